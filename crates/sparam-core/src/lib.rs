//! sparam-core: multi-port S-parameter analysis engine
//!
//! Takes parsed S-parameter data and derives mixed-mode parameters,
//! magnitude/phase traces and TDR impedance profiles, and checks networks
//! for passivity, causality and reciprocity.
//!
//! ## Modules
//!
//! - `network` - N-port network, mixed-mode transform, parameter extraction
//! - `tdr` - Time-domain reflectometry
//! - `verification` - Passivity, causality and reciprocity checks
//! - `repository` - Source-keyed network store with a mixed-mode cache
//! - `config` - Analysis settings
//! - `frequency` - Frequency axis
//! - `math` - FFT, window and linear-algebra helpers
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod constants;
pub mod error;
pub mod frequency;
pub mod math;
pub mod network;
pub mod repository;
pub mod tdr;
pub mod verification;

pub use config::{AnalysisConfig, TdrConfig, TdrMode, WindowType};
pub use error::{AnalysisError, Result};
pub use frequency::{Frequency, FrequencyUnit};
pub use network::{MixedModeLabel, Network, Parameter, ParameterTrace, PortMode};
pub use repository::NetworkRepository;
pub use tdr::TdrTrace;
pub use verification::{
    check_causality, check_passivity, check_reciprocity, verify, CheckKind, CheckResult,
    VerificationReport,
};
