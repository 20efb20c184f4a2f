//! Named S-parameter selection and magnitude/phase extraction
//!
//! Single-ended parameters are named with one-based port numbers ("S21" is
//! row 1, column 0). Mixed-mode networks expose six fixed labels.

use std::fmt;
use std::str::FromStr;

use super::core::{Network, PortMode};
use crate::error::{AnalysisError, Result};

/// The mixed-mode labels offered for a differential 4-port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixedModeLabel {
    /// Differential return loss, pair 1
    Sdd11,
    /// Differential insertion loss
    Sdd21,
    /// Common-mode return loss, pair 1
    Scc11,
    /// Common-mode insertion loss
    Scc21,
    /// Mode conversion, reflected at pair 1
    Sdc11,
    /// Mode conversion, transmitted to pair 2
    Sdc21,
}

impl MixedModeLabel {
    pub const ALL: [MixedModeLabel; 6] = [
        MixedModeLabel::Sdd11,
        MixedModeLabel::Sdd21,
        MixedModeLabel::Scc11,
        MixedModeLabel::Scc21,
        MixedModeLabel::Sdc11,
        MixedModeLabel::Sdc21,
    ];

    /// Zero-based (row, column) in the [d1, d2, c1, c2] mixed-mode matrix
    pub fn indices(self) -> (usize, usize) {
        match self {
            MixedModeLabel::Sdd11 => (0, 0),
            MixedModeLabel::Sdd21 => (1, 0),
            MixedModeLabel::Scc11 => (2, 2),
            MixedModeLabel::Scc21 => (3, 2),
            MixedModeLabel::Sdc11 => (2, 0),
            MixedModeLabel::Sdc21 => (3, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MixedModeLabel::Sdd11 => "S_dd11",
            MixedModeLabel::Sdd21 => "S_dd21",
            MixedModeLabel::Scc11 => "S_cc11",
            MixedModeLabel::Scc21 => "S_cc21",
            MixedModeLabel::Sdc11 => "S_dc11",
            MixedModeLabel::Sdc21 => "S_dc21",
        }
    }
}

/// A parsed S-parameter name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// S_ij of a single-ended network, zero-based
    SingleEnded { i: usize, j: usize },
    MixedMode(MixedModeLabel),
}

impl Parameter {
    /// Zero-based (row, column)
    pub fn indices(&self) -> (usize, usize) {
        match *self {
            Parameter::SingleEnded { i, j } => (i, j),
            Parameter::MixedMode(label) => label.indices(),
        }
    }

    /// Port mode a network must have for this name to apply
    pub fn required_mode(&self) -> PortMode {
        match self {
            Parameter::SingleEnded { .. } => PortMode::SingleEnded,
            Parameter::MixedMode(_) => PortMode::MixedMode,
        }
    }

    /// Self-reflection term (diagonal element)
    pub fn is_reflection(&self) -> bool {
        let (i, j) = self.indices();
        i == j
    }

    /// Check the name against a network and return its indices
    pub fn resolve(&self, network: &Network) -> Result<(usize, usize)> {
        let label = self.to_string();
        if network.mode() != self.required_mode() {
            return Err(AnalysisError::invalid_parameter(
                &label,
                format!(
                    "requires a {} network, got a {} network",
                    self.required_mode(),
                    network.mode()
                ),
            ));
        }
        let (i, j) = self.indices();
        let nports = network.nports();
        if i >= nports || j >= nports {
            return Err(AnalysisError::invalid_parameter(
                &label,
                format!("network has only {} ports", nports),
            ));
        }
        Ok((i, j))
    }
}

impl FromStr for Parameter {
    type Err = AnalysisError;

    fn from_str(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if let Some(label) = MixedModeLabel::ALL
            .iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(trimmed))
        {
            return Ok(Parameter::MixedMode(*label));
        }

        let digits = trimmed
            .strip_prefix('S')
            .or_else(|| trimmed.strip_prefix('s'))
            .ok_or_else(|| AnalysisError::invalid_parameter(name, "unrecognized parameter"))?;
        let ports: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
        match ports.as_slice() {
            [i, j] if digits.len() == 2 && *i >= 1 && *j >= 1 => Ok(Parameter::SingleEnded {
                i: (*i - 1) as usize,
                j: (*j - 1) as usize,
            }),
            _ => Err(AnalysisError::invalid_parameter(
                name,
                "unrecognized parameter",
            )),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::SingleEnded { i, j } => write!(f, "S{}{}", i + 1, j + 1),
            Parameter::MixedMode(label) => f.write_str(label.as_str()),
        }
    }
}

/// Magnitude and phase of one parameter over frequency
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTrace {
    pub parameter: Parameter,
    /// Frequency in Hz
    pub frequency: Vec<f64>,
    /// 20 * log10(|S_ij|)
    pub magnitude_db: Vec<f64>,
    /// angle(S_ij) in degrees
    pub phase_deg: Vec<f64>,
}

impl Network {
    /// Extract magnitude (dB) and phase (degrees) for a parameter name
    ///
    /// # Errors
    /// `EmptyNetwork` for a zero-point network, `InvalidParameter` for an
    /// unknown name or one that does not fit this network's ports or mode.
    pub fn extract(&self, name: &str) -> Result<ParameterTrace> {
        let parameter: Parameter = name.parse()?;
        self.extract_parameter(parameter)
    }

    /// Extract magnitude (dB) and phase (degrees) for a parsed parameter
    pub fn extract_parameter(&self, parameter: Parameter) -> Result<ParameterTrace> {
        self.ensure_not_empty()?;
        let (i, j) = parameter.resolve(self)?;
        let sij = self.trace(i, j);

        Ok(ParameterTrace {
            parameter,
            frequency: self.f().to_vec(),
            magnitude_db: sij.iter().map(|c| 20.0 * c.norm().log10()).collect(),
            phase_deg: sij
                .iter()
                .map(|c| c.arg() * 180.0 / std::f64::consts::PI)
                .collect(),
        })
    }

    /// Parameters that can be extracted from this network
    pub fn available_parameters(&self) -> Vec<Parameter> {
        match self.mode() {
            PortMode::MixedMode => MixedModeLabel::ALL
                .iter()
                .map(|l| Parameter::MixedMode(*l))
                .collect(),
            PortMode::SingleEnded => {
                let n = self.nports().min(9);
                (0..n)
                    .flat_map(|i| (0..n).map(move |j| Parameter::SingleEnded { i, j }))
                    .collect()
            }
        }
    }
}
