//! Time-domain analysis functions
//!
//! Provides the impulse response of every S-parameter via inverse FFT along
//! the frequency axis.
//!
//! Note: for physically meaningful results the frequency data should start
//! at 0 Hz and be uniformly spaced. See [`crate::tdr`] for the reflectometry
//! pipeline that takes care of both.

use ndarray::{s, Array3};
use num_complex::Complex64;

use super::core::Network;
use crate::config::WindowType;
use crate::error::{AnalysisError, Result};
use crate::math::fft::{fft_times, ifft};
use crate::math::window::window;

/// Inverse FFT of every S_ij along the frequency axis
///
/// Output has the input's shape and numpy `ifft(s, axis=0)` ordering:
/// index 0 is the time origin.
pub fn ifft_frequency_axis(s: &Array3<Complex64>) -> Array3<Complex64> {
    let (nfreq, rows, cols) = s.dim();
    let mut out = Array3::<Complex64>::zeros((nfreq, rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            let column: Vec<Complex64> = s.slice(s![.., i, j]).to_vec();
            let time = ifft(&column);
            for (k, v) in time.into_iter().enumerate() {
                out[[k, i, j]] = v;
            }
        }
    }
    out
}

impl Network {
    /// Calculate time-domain impulse response
    ///
    /// Applies `window` along frequency, zero-pads by `pad` points and takes
    /// the inverse FFT of every S-parameter. Returns `(time_s, response)`
    /// where `response` has shape [nfreq + pad, nports, nports] and both are
    /// in FFT order (non-negative times first).
    ///
    /// # Errors
    /// `EmptyNetwork`, or `InsufficientData` with fewer than two points.
    pub fn impulse_response(
        &self,
        window_type: WindowType,
        pad: usize,
    ) -> Result<(Vec<f64>, Array3<Complex64>)> {
        self.ensure_not_empty()?;
        let df = self
            .frequency()
            .step()
            .ok_or(AnalysisError::InsufficientData {
                required: 2,
                actual: self.nfreq(),
            })?;

        let nfreq = self.nfreq();
        let nports = self.nports();
        let n_total = nfreq + pad;

        let w = window(window_type, nfreq);
        let mut padded = Array3::<Complex64>::zeros((n_total, nports, nports));
        for (k, wk) in w.iter().enumerate() {
            let slice = self.s_at(k).mapv(|c| c * *wk);
            padded.slice_mut(s![k, .., ..]).assign(&slice);
        }

        Ok((fft_times(n_total, df), ifft_frequency_axis(&padded)))
    }
}
