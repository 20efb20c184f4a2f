//! Physical-validity checks
//!
//! Three independent single-pass checks over one Network:
//!
//! - [`check_passivity`]: eigenvalues of S * S^H never exceed 1
//! - [`check_causality`]: coarse time-origin sign heuristic
//! - [`check_reciprocity`]: S equals its transpose within tolerance
//!
//! Every check rejects a zero-point network with `EmptyNetwork` before
//! looking at any data.

mod causality;
mod passivity;
mod reciprocity;
mod report;

pub use causality::check_causality;
pub use passivity::{check_passivity, power_eigenvalues};
pub use reciprocity::{check_reciprocity, deviation_matrix};
pub use report::format_frequency;

use ndarray::Array2;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::network::Network;

/// Which check produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Passivity,
    Causality,
    Reciprocity,
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub passed: bool,
    /// Lowest violating frequency in Hz
    pub first_violation_hz: Option<f64>,
    pub details: CheckDetails,
}

/// Check-specific diagnostics
#[derive(Debug, Clone, PartialEq)]
pub enum CheckDetails {
    Passivity(PassivityDetails),
    Causality(CausalityDetails),
    Reciprocity(ReciprocityDetails),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassivityDetails {
    pub tolerance: f64,
    /// Largest eigenvalue of S * S^H over the scanned frequencies
    pub max_eigenvalue: f64,
    /// Frequency index of the first violation
    pub violation_index: Option<usize>,
    /// Number of frequencies evaluated; the scan stops at the first violation
    pub scanned: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CausalityDetails {
    /// Real part of the impulse response at t = 0, per matrix entry
    pub origin: Array2<f64>,
    /// Zero-based (row, column) entries with a negative origin sample
    pub violations: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReciprocityDetails {
    pub tolerance: f64,
    /// Number of frequencies evaluated
    pub checked: usize,
    pub violations: Vec<ReciprocityViolation>,
}

/// One frequency where S differs from S^T
#[derive(Debug, Clone, PartialEq)]
pub struct ReciprocityViolation {
    pub index: usize,
    pub frequency_hz: f64,
    /// Element-wise |S - S^T|
    pub deviation: Array2<f64>,
}

/// All three checks for one network
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub name: Option<String>,
    pub passivity: CheckResult,
    pub causality: CheckResult,
    pub reciprocity: CheckResult,
}

impl VerificationReport {
    pub fn all_passed(&self) -> bool {
        self.passivity.passed && self.causality.passed && self.reciprocity.passed
    }

    pub fn results(&self) -> [&CheckResult; 3] {
        [&self.passivity, &self.causality, &self.reciprocity]
    }
}

/// Run passivity, causality and reciprocity checks with the configured
/// tolerances
pub fn verify(network: &Network, config: &AnalysisConfig) -> Result<VerificationReport> {
    Ok(VerificationReport {
        name: network.name().map(str::to_string),
        passivity: check_passivity(network, Some(config.passivity_tol))?,
        causality: check_causality(network)?,
        reciprocity: check_reciprocity(network, Some(config.reciprocity_tol))?,
    })
}
