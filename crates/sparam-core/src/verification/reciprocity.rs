//! Reciprocity check
//!
//! A reciprocal network has S_ij = S_ji at every frequency.

use ndarray::{Array2, ArrayView2};

use super::{CheckDetails, CheckKind, CheckResult, ReciprocityDetails, ReciprocityViolation};
use crate::constants::RECIPROCITY_TOL;
use crate::error::Result;
use crate::network::Network;

/// Element-wise |S - S^T|
pub fn deviation_matrix(s: &ArrayView2<num_complex::Complex64>) -> Array2<f64> {
    let n = s.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| (s[[i, j]] - s[[j, i]]).norm())
}

/// Test reciprocity at every frequency
///
/// All frequencies are evaluated; every one where some |S_ij - S_ji|
/// exceeds `tol` is reported with its deviation matrix. `tol` defaults to
/// [`RECIPROCITY_TOL`].
pub fn check_reciprocity(network: &Network, tol: Option<f64>) -> Result<CheckResult> {
    network.ensure_not_empty()?;
    let tol = tol.unwrap_or(RECIPROCITY_TOL);

    let violations: Vec<ReciprocityViolation> = (0..network.nfreq())
        .filter_map(|k| {
            let deviation = deviation_matrix(&network.s_at(k));
            deviation
                .iter()
                .any(|&d| d > tol)
                .then(|| ReciprocityViolation {
                    index: k,
                    frequency_hz: network.f()[k],
                    deviation,
                })
        })
        .collect();

    Ok(CheckResult {
        kind: CheckKind::Reciprocity,
        passed: violations.is_empty(),
        first_violation_hz: violations.first().map(|v| v.frequency_hz),
        details: CheckDetails::Reciprocity(ReciprocityDetails {
            tolerance: tol,
            checked: network.nfreq(),
            violations,
        }),
    })
}
