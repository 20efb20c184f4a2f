//! FFT helpers for time-domain transforms
//!
//! Thin wrappers over rustfft with numpy-compatible normalisation
//! (the inverse transform is scaled by 1/n).

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::{AnalysisError, Result};

/// Inverse FFT, normalised by 1/n
///
/// rustfft 6.x uses num_complex::Complex directly, so no conversion is needed.
pub fn ifft(data: &[Complex64]) -> Vec<Complex64> {
    let n = data.len();
    if n == 0 {
        return vec![];
    }

    let mut buffer: Vec<Complex64> = data.to_vec();
    let mut planner = FftPlanner::new();
    planner.plan_fft_inverse(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    for c in buffer.iter_mut() {
        *c *= scale;
    }
    buffer
}

/// Inverse FFT of a one-sided spectrum assumed Hermitian-symmetric
///
/// `half[0]` is the DC bin. The full spectrum has length `2 * half.len()`;
/// the Nyquist bin is zero. Returns the real part of the time signal.
pub fn irfft_hermitian(half: &[Complex64]) -> Vec<f64> {
    let m = half.len();
    if m == 0 {
        return vec![];
    }

    let n = 2 * m;
    let mut full = vec![Complex64::new(0.0, 0.0); n];
    full[0] = Complex64::new(half[0].re, 0.0);
    for k in 1..m {
        full[k] = half[k];
        full[n - k] = half[k].conj();
    }

    ifft(&full).into_iter().map(|c| c.re).collect()
}

/// Smallest power of two >= max(n, 1)
///
/// # Errors
/// `TransformTooLarge` when the result does not fit in `usize`.
#[inline]
pub fn next_pow2(n: usize) -> Result<usize> {
    n.max(1)
        .checked_next_power_of_two()
        .ok_or(AnalysisError::TransformTooLarge {
            required: n,
            limit: 1 << (usize::BITS - 1),
        })
}

/// Sample times for an `n`-point transform of data spaced `df` Hz apart
///
/// Same ordering as numpy `fftfreq(n, d=df)`: non-negative times first, then
/// negative times.
pub fn fft_times(n: usize, df: f64) -> Vec<f64> {
    let dt = 1.0 / (n as f64 * df);
    let half = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < half {
                k as f64 * dt
            } else {
                (k as f64 - n as f64) * dt
            }
        })
        .collect()
}
