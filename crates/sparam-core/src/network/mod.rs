//! Network module - N-port electrical network representation
//!
//! Provides the core Network struct and the transforms defined on it:
//! mixed-mode conversion, parameter extraction, DC extrapolation and
//! impulse response.

mod core;
mod extrapolate;
mod mixed_mode;
mod params;
mod time_domain;

pub use self::core::{Network, PortMode};
pub use extrapolate::{extrapolate_trace_to_dc, DcGrid};
pub use mixed_mode::mode_matrix;
pub use params::{MixedModeLabel, Parameter, ParameterTrace};
pub use time_domain::ifft_frequency_axis;
