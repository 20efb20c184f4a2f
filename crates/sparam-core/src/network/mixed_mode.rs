//! Mixed-mode S-parameter conversions
//!
//! Converts between single-ended and differential/common-mode S-parameters
//! for a 4-port network made of two differential pairs.
//!
//! Port mapping:
//! - Ports 1, 2: differential pair 1 (positive, negative)
//! - Ports 3, 4: differential pair 2 (positive, negative)
//!
//! The resulting mixed-mode matrix is ordered [d1, d2, c1, c2]:
//! ```text
//! | Sdd11 Sdd12 | Sdc11 Sdc12 |
//! | Sdd21 Sdd22 | Sdc21 Sdc22 |
//! |-------------|-------------|
//! | Scd11 Scd12 | Scc11 Scc12 |
//! | Scd21 Scd22 | Scc21 Scc22 |
//! ```

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use super::core::{Network, PortMode};
use crate::error::{AnalysisError, Result};

/// Mode matrix M
///
/// ```text
/// M = 1/√2 * | 1 -1  0  0 |  (d1)
///            | 0  0  1 -1 |  (d2)
///            | 1  1  0  0 |  (c1)
///            | 0  0  1  1 |  (c2)
/// ```
///
/// M is orthogonal, so M^-1 = M^T.
pub fn mode_matrix() -> Array2<f64> {
    let h = FRAC_1_SQRT_2;
    ndarray::arr2(&[
        [h, -h, 0.0, 0.0],
        [0.0, 0.0, h, -h],
        [h, h, 0.0, 0.0],
        [0.0, 0.0, h, h],
    ])
}

impl Network {
    /// Convert 4-port single-ended S-parameters to mixed-mode
    ///
    /// S_mm = M * S * M^T at every frequency independently.
    ///
    /// # Errors
    /// `UnsupportedPortCount` unless the network has 4 ports, `InvalidMode`
    /// if it is already mixed-mode.
    pub fn to_mixed_mode(&self) -> Result<Network> {
        self.ensure_nports(4)?;
        if self.mode() != PortMode::SingleEnded {
            return Err(AnalysisError::InvalidMode {
                expected: PortMode::SingleEnded,
                actual: self.mode(),
            });
        }
        Ok(self.mixed_mode_unchecked())
    }

    /// M * S * M^T without the port-count and mode checks
    pub(crate) fn mixed_mode_unchecked(&self) -> Network {
        let m = mode_matrix();
        let s_mm = similarity(self.s(), &m, &m.t().to_owned());
        self.derive(s_mm, PortMode::MixedMode)
    }

    /// Convert mixed-mode S-parameters back to single-ended
    ///
    /// S = M^T * S_mm * M
    pub fn to_single_ended(&self) -> Result<Network> {
        self.ensure_nports(4)?;
        if self.mode() != PortMode::MixedMode {
            return Err(AnalysisError::InvalidMode {
                expected: PortMode::MixedMode,
                actual: self.mode(),
            });
        }
        let m = mode_matrix();
        let s_se = similarity(self.s(), &m.t().to_owned(), &m);
        Ok(self.derive(s_se, PortMode::SingleEnded))
    }
}

/// Compute left * S_f * right for every frequency slice
fn similarity(s: &Array3<Complex64>, left: &Array2<f64>, right: &Array2<f64>) -> Array3<Complex64> {
    let left = left.mapv(|x| Complex64::new(x, 0.0));
    let right = right.mapv(|x| Complex64::new(x, 0.0));
    let mut out = Array3::<Complex64>::zeros(s.raw_dim());

    for (src, mut dst) in s.outer_iter().zip(out.outer_iter_mut()) {
        dst.assign(&left.dot(&src).dot(&right));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn four_port(s: Array3<Complex64>) -> Network {
        let nfreq = s.shape()[0];
        let f = (1..=nfreq).map(|k| k as f64 * 1e9).collect();
        Network::from_hz(f, s, 50.0).unwrap()
    }

    #[test]
    fn test_mode_matrix_is_orthogonal() {
        let m = mode_matrix();
        let eye = m.dot(&m.t());
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(eye[[i, j]], expected, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_ideal_differential_thru() {
        // Port 1 -> 3 and port 2 -> 4 straight through, both directions
        let mut s = Array3::<Complex64>::zeros((1, 4, 4));
        s[[0, 2, 0]] = Complex64::new(0.9, 0.0);
        s[[0, 0, 2]] = Complex64::new(0.9, 0.0);
        s[[0, 3, 1]] = Complex64::new(0.9, 0.0);
        s[[0, 1, 3]] = Complex64::new(0.9, 0.0);

        let mm = four_port(s).to_mixed_mode().unwrap();
        assert!(mm.is_mixed_mode());

        let s = mm.s();
        // Sdd21 and Scc21 carry the full thru, no mode conversion
        assert_relative_eq!(s[[0, 1, 0]].re, 0.9, epsilon = 1e-12);
        assert_relative_eq!(s[[0, 3, 2]].re, 0.9, epsilon = 1e-12);
        assert_relative_eq!(s[[0, 2, 0]].norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(s[[0, 0, 0]].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_two_port() {
        let s = Array3::<Complex64>::zeros((1, 2, 2));
        let ntwk = Network::from_hz(vec![1e9], s, 50.0).unwrap();
        assert_eq!(
            ntwk.to_mixed_mode(),
            Err(AnalysisError::UnsupportedPortCount {
                required: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_double_conversion() {
        let s = Array3::<Complex64>::zeros((1, 4, 4));
        let mm = four_port(s).to_mixed_mode().unwrap();
        assert!(matches!(
            mm.to_mixed_mode(),
            Err(AnalysisError::InvalidMode { .. })
        ));
        assert!(matches!(
            mm.to_single_ended().unwrap().to_single_ended(),
            Err(AnalysisError::InvalidMode { .. })
        ));
    }
}
