//! Window functions for time-domain transforms

use std::f64::consts::PI;

use crate::config::WindowType;

/// Symmetric window of length `n`
pub fn window(window: WindowType, n: usize) -> Vec<f64> {
    match window {
        WindowType::None => vec![1.0; n],
        WindowType::Hamming => cosine_window(n, &[0.54, 0.46]),
        WindowType::Hanning => cosine_window(n, &[0.5, 0.5]),
        WindowType::Blackman => cosine_window(n, &[0.42, 0.5, 0.08]),
        WindowType::Kaiser { beta } => kaiser_window(n, beta),
    }
}

/// Right half of a symmetric window of length `2n - 1`
///
/// `w[0]` is the window peak (1.0) and `w[n - 1]` its edge. Used on one-sided
/// spectra that start at DC so that the DC bin is left unweighted.
pub fn half_window(window_type: WindowType, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let full = window(window_type, 2 * n - 1);
    full[n - 1..].to_vec()
}

/// Generalized cosine window: w[n] = sum((-1)^k * coeffs[k] * cos(k * 2π * n / (N-1)))
///
/// This unifies Hamming, Hann, and Blackman windows with different coefficients.
fn cosine_window(n: usize, coeffs: &[f64]) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| {
            let x = 2.0 * PI * i as f64 / (n - 1) as f64;
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| {
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    sign * c * (k as f64 * x).cos()
                })
                .sum()
        })
        .collect()
}

/// Kaiser window: w[n] = I0(β·sqrt(1 - r²)) / I0(β), r = 2n/(N-1) - 1
fn kaiser_window(n: usize, beta: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    let denom = bessel_i0(beta);
    (0..n)
        .map(|i| {
            let r = 2.0 * i as f64 / (n - 1) as f64 - 1.0;
            bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / denom
        })
        .collect()
}

/// Modified Bessel function of the first kind, order zero (power series)
fn bessel_i0(x: f64) -> f64 {
    let half_sq = (x / 2.0) * (x / 2.0);
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..200 {
        term *= half_sq / (k as f64 * k as f64);
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}
