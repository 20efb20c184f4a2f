//! DC extrapolation
//!
//! Time-domain step responses need data on a uniform grid that starts at
//! 0 Hz. Measured sweeps rarely do, so the missing low-frequency points are
//! synthesised by linear extrapolation from the two lowest measured points.

use ndarray::Array3;
use num_complex::Complex64;

use super::core::Network;
use crate::constants::MAX_TDR_POINTS;
use crate::error::{AnalysisError, Result};
use crate::frequency::Frequency;

/// Uniformly spaced data starting at 0 Hz
#[derive(Debug, Clone)]
pub struct DcGrid {
    /// Grid spacing in Hz
    pub df: f64,
    /// Values at k * df, k = 0..len
    pub values: Vec<Complex64>,
}

/// Resample `x(f)` onto the grid k * df, k = 0..=round(f_max / df)
///
/// `df` is the mean spacing of `f`. Points below the first measured
/// frequency (including DC) are extrapolated linearly from the first two
/// points; interior points are linearly interpolated.
///
/// The grid length depends on how far the sweep sits above DC relative to
/// its spacing, not on the number of measured points.
///
/// # Errors
/// `InsufficientData` with fewer than two points, `TransformTooLarge` when
/// the grid would exceed `max_points`.
pub fn extrapolate_trace_to_dc(f: &[f64], x: &[Complex64], max_points: usize) -> Result<DcGrid> {
    let n = f.len().min(x.len());
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let df = (f[n - 1] - f[0]) / (n - 1) as f64;
    let steps = (f[n - 1] / df).round();
    if steps.is_nan() || steps >= max_points as f64 {
        return Err(AnalysisError::TransformTooLarge {
            required: (steps as usize).saturating_add(1),
            limit: max_points,
        });
    }
    let npoints = steps as usize + 1;
    let values = (0..npoints)
        .map(|k| interp_linear(&f[..n], &x[..n], k as f64 * df))
        .collect();

    Ok(DcGrid { df, values })
}

/// Piecewise-linear interpolation, extended linearly past both ends
fn interp_linear(f: &[f64], x: &[Complex64], at: f64) -> Complex64 {
    let n = f.len();
    // Index of the segment [f[seg], f[seg + 1]] used for `at`
    let seg = match f.partition_point(|&v| v <= at) {
        0 => 0,
        p if p >= n => n - 2,
        p => p - 1,
    };
    let t = (at - f[seg]) / (f[seg + 1] - f[seg]);
    x[seg] + (x[seg + 1] - x[seg]) * t
}

impl Network {
    /// Resample every S-parameter onto a uniform grid starting at 0 Hz
    ///
    /// # Errors
    /// `EmptyNetwork`, `InsufficientData` with fewer than two points and
    /// `TransformTooLarge` when the grid would exceed
    /// [`MAX_TDR_POINTS`](crate::constants::MAX_TDR_POINTS).
    pub fn extrapolate_to_dc(&self) -> Result<Network> {
        self.ensure_not_empty()?;
        let nports = self.nports();

        let mut grids = Vec::with_capacity(nports * nports);
        for i in 0..nports {
            for j in 0..nports {
                let x = self.trace(i, j).to_vec();
                grids.push(extrapolate_trace_to_dc(self.f(), &x, MAX_TDR_POINTS)?);
            }
        }

        let df = grids[0].df;
        let npoints = grids[0].values.len();
        let s = Array3::from_shape_fn((npoints, nports, nports), |(k, i, j)| {
            grids[i * nports + j].values[k]
        });
        let f: Vec<f64> = (0..npoints).map(|k| k as f64 * df).collect();
        let frequency = Frequency::from_hz(f).with_unit(self.frequency().unit());

        Ok(self.resample(frequency, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prepends_dc_on_offset_grid() {
        // Uniform 1 GHz grid starting one step above DC
        let f = vec![1e9, 2e9, 3e9];
        let x = vec![
            Complex64::new(0.2, 0.1),
            Complex64::new(0.3, 0.2),
            Complex64::new(0.4, 0.3),
        ];

        let grid = extrapolate_trace_to_dc(&f, &x, MAX_TDR_POINTS).unwrap();
        assert_relative_eq!(grid.df, 1e9, epsilon = 1e-3);
        assert_eq!(grid.values.len(), 4);
        // DC = x0 - (x1 - x0)
        assert_relative_eq!(grid.values[0].re, 0.1, epsilon = 1e-12);
        assert_relative_eq!(grid.values[0].im, 0.0, epsilon = 1e-12);
        assert_relative_eq!(grid.values[3].re, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_data_stays_constant() {
        let f = vec![0.3e9, 0.8e9, 1.3e9, 1.8e9];
        let x = vec![Complex64::new(0.2, 0.0); 4];

        let grid = extrapolate_trace_to_dc(&f, &x, MAX_TDR_POINTS).unwrap();
        for v in &grid.values {
            assert_relative_eq!(v.re, 0.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let x = [Complex64::new(0.1, 0.0)];
        let result = extrapolate_trace_to_dc(&[1e9], &x, MAX_TDR_POINTS);
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_grid_far_above_dc_is_rejected() {
        // 1 Hz spacing at 1 GHz would need a billion-point grid
        let f: Vec<f64> = (0..11).map(|k| 1e9 + k as f64).collect();
        let x = vec![Complex64::new(0.2, 0.0); 11];

        let err = extrapolate_trace_to_dc(&f, &x, MAX_TDR_POINTS).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::TransformTooLarge {
                required: 1_000_000_011,
                limit: MAX_TDR_POINTS
            }
        );
    }

    #[test]
    fn test_grid_limit_is_inclusive() {
        let f = vec![1e9, 2e9, 3e9];
        let x = vec![Complex64::new(0.1, 0.0); 3];

        assert_eq!(extrapolate_trace_to_dc(&f, &x, 4).unwrap().values.len(), 4);
        assert!(matches!(
            extrapolate_trace_to_dc(&f, &x, 3),
            Err(AnalysisError::TransformTooLarge {
                required: 4,
                limit: 3
            })
        ));
    }

    #[test]
    fn test_network_extrapolate_to_dc() {
        let mut s = Array3::<Complex64>::zeros((3, 2, 2));
        for k in 0..3 {
            s[[k, 0, 0]] = Complex64::new(0.1 * (k + 1) as f64, 0.0);
            s[[k, 1, 0]] = Complex64::new(0.9, 0.0);
        }
        let ntwk = Network::from_hz(vec![1e9, 2e9, 3e9], s, 50.0).unwrap();

        let dc = ntwk.extrapolate_to_dc().unwrap();
        assert_eq!(dc.nfreq(), 4);
        assert_eq!(dc.f()[0], 0.0);
        assert_relative_eq!(dc.s()[[0, 0, 0]].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dc.s()[[0, 1, 0]].re, 0.9, epsilon = 1e-12);
    }
}
