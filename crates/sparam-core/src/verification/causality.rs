//! Causality heuristic
//!
//! Takes the inverse FFT of every S_ij along the frequency axis and looks at
//! the sample at the time origin: the network is deemed causal when its real
//! part is non-negative for every entry.
//!
//! This is a coarse screen, not a proof. Band-limited data cannot be exactly
//! causal in time, and a rigorous test would check Kramers-Kronig (Hilbert
//! transform) consistency between magnitude and phase instead.

use ndarray::{s, Array2};

use super::{CausalityDetails, CheckDetails, CheckKind, CheckResult};
use crate::error::Result;
use crate::network::{ifft_frequency_axis, Network};

/// Time-origin sign heuristic for causality
///
/// The result never carries a violating frequency; violations are reported
/// per matrix entry in [`CausalityDetails`].
pub fn check_causality(network: &Network) -> Result<CheckResult> {
    network.ensure_not_empty()?;

    let impulse = ifft_frequency_axis(network.s());
    let origin: Array2<f64> = impulse.slice(s![0, .., ..]).mapv(|c| c.re);
    let violations: Vec<(usize, usize)> = origin
        .indexed_iter()
        .filter(|(_, v)| **v < 0.0)
        .map(|(idx, _)| idx)
        .collect();

    Ok(CheckResult {
        kind: CheckKind::Causality,
        passed: violations.is_empty(),
        first_violation_hz: None,
        details: CheckDetails::Causality(CausalityDetails { origin, violations }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    #[test]
    fn test_delay_line_is_causal() {
        let n = 64;
        let f: Vec<f64> = (0..n).map(|k| k as f64 * 1e8).collect();
        let mut s = Array3::<Complex64>::zeros((n, 2, 2));
        for (k, fk) in f.iter().enumerate() {
            let thru = Complex64::from_polar(0.9, -2.0 * PI * fk * 1e-9);
            s[[k, 0, 1]] = thru;
            s[[k, 1, 0]] = thru;
        }
        let ntwk = Network::from_hz(f, s, 50.0).unwrap();

        let result = check_causality(&ntwk).unwrap();
        assert!(result.passed);
        assert_eq!(result.first_violation_hz, None);
    }

    #[test]
    fn test_negative_origin_fails() {
        let mut s = Array3::<Complex64>::zeros((4, 2, 2));
        for k in 0..4 {
            s[[k, 0, 0]] = Complex64::new(-0.5, 0.0);
        }
        let ntwk = Network::from_hz(vec![1e9, 2e9, 3e9, 4e9], s, 50.0).unwrap();

        let result = check_causality(&ntwk).unwrap();
        assert!(!result.passed);
        match result.details {
            CheckDetails::Causality(d) => {
                assert_eq!(d.violations, vec![(0, 0)]);
                assert_eq!(d.origin[[0, 0]], -0.5);
            }
            _ => panic!("wrong details"),
        }
    }
}
