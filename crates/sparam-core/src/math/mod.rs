//! Mathematical functions module
//!
//! Linear algebra, FFT and window helpers used by the network transforms
//! and the verification suite.

pub mod fft;
pub mod linalg;
pub mod window;

pub use linalg::{hermitian_eigenvalues, power_matrix};
pub use window::{half_window, window};
