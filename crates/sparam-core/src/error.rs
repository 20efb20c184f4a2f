//! Error types for network analysis

use thiserror::Error;

use crate::network::PortMode;

/// Errors raised by the analysis engine
///
/// Every variant is structural: the requested operation is aborted without
/// partial output. Per-sample numeric degeneracies are not errors; they are
/// reported on the affected trace instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Operation requires a {required}-port network, got {actual} ports")]
    UnsupportedPortCount { required: usize, actual: usize },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Insufficient data: need at least {required} frequency points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Network has no frequency points")]
    EmptyNetwork,

    #[error("Expected a {expected} network, got {actual}")]
    InvalidMode { expected: PortMode, actual: PortMode },

    #[error("Malformed network: {0}")]
    MalformedNetwork(String),

    #[error("Transform needs {required} points, limit is {limit}")]
    TransformTooLarge { required: usize, limit: usize },

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
