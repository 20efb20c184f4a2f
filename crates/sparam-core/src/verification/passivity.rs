//! Passivity check
//!
//! A network is passive if it never delivers more power than it receives:
//! every eigenvalue of the power matrix S * S^H is at most 1 at every
//! frequency (equivalently, no singular value of S exceeds 1).

use ndarray::Array2;
use tracing::debug;

use super::{CheckDetails, CheckKind, CheckResult, PassivityDetails};
use crate::constants::PASSIVITY_TOL;
use crate::error::Result;
use crate::math::linalg::{hermitian_eigenvalues, power_matrix};
use crate::network::Network;

/// Test passivity frequency by frequency
///
/// Frequencies are scanned in ascending order and the scan stops at the
/// first frequency with an eigenvalue above `1 + tol`. `tol` defaults to
/// [`PASSIVITY_TOL`].
pub fn check_passivity(network: &Network, tol: Option<f64>) -> Result<CheckResult> {
    network.ensure_not_empty()?;
    let tol = tol.unwrap_or(PASSIVITY_TOL);
    let threshold = 1.0 + tol;

    let mut max_eigenvalue = f64::NEG_INFINITY;
    let mut violation_index = None;
    let mut scanned = 0;

    for k in 0..network.nfreq() {
        scanned += 1;
        let s_k = network.s_at(k);
        let p_k = power_matrix(&s_k);
        let largest = hermitian_eigenvalues(&p_k.view())
            .last()
            .copied()
            .unwrap_or(0.0);
        max_eigenvalue = max_eigenvalue.max(largest);

        if largest > threshold {
            violation_index = Some(k);
            break;
        }
    }

    let first_violation_hz = violation_index.map(|k| network.f()[k]);
    if let Some(f) = first_violation_hz {
        debug!(frequency_hz = f, eigenvalue = max_eigenvalue, "passivity violated");
    }

    Ok(CheckResult {
        kind: CheckKind::Passivity,
        passed: violation_index.is_none(),
        first_violation_hz,
        details: CheckDetails::Passivity(PassivityDetails {
            tolerance: tol,
            max_eigenvalue,
            violation_index,
            scanned,
        }),
    })
}

/// Eigenvalues of S * S^H at every frequency, ascending per row
///
/// Shape [nfreq, nports]. Intended for plotting how close a network comes
/// to the passivity limit.
pub fn power_eigenvalues(network: &Network) -> Result<Array2<f64>> {
    network.ensure_not_empty()?;
    let nports = network.nports();
    let mut out = Array2::<f64>::zeros((network.nfreq(), nports));

    for k in 0..network.nfreq() {
        let p_k = power_matrix(&network.s_at(k));
        for (p, eig) in hermitian_eigenvalues(&p_k.view()).into_iter().enumerate() {
            out[[k, p]] = eig;
        }
    }
    Ok(out)
}
