//! Human-readable check output

use std::fmt;

use ndarray::Array2;

use super::{CheckDetails, CheckKind, CheckResult, VerificationReport};

/// Format a frequency in Hz with an automatic unit, e.g. `2.500 GHz`
pub fn format_frequency(hz: f64) -> String {
    let abs = hz.abs();
    let (scale, unit) = if abs >= 1e12 {
        (1e12, "THz")
    } else if abs >= 1e9 {
        (1e9, "GHz")
    } else if abs >= 1e6 {
        (1e6, "MHz")
    } else if abs >= 1e3 {
        (1e3, "kHz")
    } else {
        (1.0, "Hz")
    };
    format!("{:.3} {}", hz / scale, unit)
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Passivity => write!(f, "passivity"),
            CheckKind::Causality => write!(f, "causality"),
            CheckKind::Reciprocity => write!(f, "reciprocity"),
        }
    }
}

fn write_matrix(f: &mut fmt::Formatter<'_>, m: &Array2<f64>) -> fmt::Result {
    for row in m.rows() {
        write!(f, "      ")?;
        for v in row {
            write!(f, " {:>10.3e}", v)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        match &self.details {
            CheckDetails::Passivity(d) => {
                writeln!(f, "{}: {}", self.kind, verdict)?;
                writeln!(
                    f,
                    "  max eigenvalue of S*S^H: {:.6} (limit 1 + {:e}, {} frequencies scanned)",
                    d.max_eigenvalue, d.tolerance, d.scanned
                )?;
                if let (Some(hz), Some(k)) = (self.first_violation_hz, d.violation_index) {
                    writeln!(f, "  first violation at {} (index {})", format_frequency(hz), k)?;
                }
            }
            CheckDetails::Causality(d) => {
                writeln!(f, "{} (heuristic): {}", self.kind, verdict)?;
                if d.violations.is_empty() {
                    writeln!(f, "  impulse response non-negative at t = 0")?;
                } else {
                    let entries: Vec<String> = d
                        .violations
                        .iter()
                        .map(|(i, j)| format!("S{}{}", i + 1, j + 1))
                        .collect();
                    writeln!(f, "  negative at t = 0: {}", entries.join(", "))?;
                }
            }
            CheckDetails::Reciprocity(d) => {
                writeln!(f, "{}: {}", self.kind, verdict)?;
                writeln!(
                    f,
                    "  {} of {} frequencies exceed tolerance {:e}",
                    d.violations.len(),
                    d.checked,
                    d.tolerance
                )?;
                for v in &d.violations {
                    writeln!(f, "    {} |S - S^T|:", format_frequency(v.frequency_hz))?;
                    write_matrix(f, &v.deviation)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "Verification of {}", name)?,
            None => writeln!(f, "Verification")?,
        }
        for result in self.results() {
            write!(f, "{}", result)?;
        }
        let overall = if self.all_passed() { "PASS" } else { "FAIL" };
        writeln!(f, "overall: {}", overall)
    }
}
