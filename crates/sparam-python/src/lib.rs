//! Python bindings for sparam-core
//!
//! This module exposes the analysis engine to Python via PyO3. A
//! presentation layer loads Touchstone files itself and hands the parsed
//! arrays to `Network`.
//!
//! ## Classes
//!
//! - `Network` - N-port network built from numpy arrays
//! - `TdrTrace` - Impedance profile
//! - `CheckResult` / `VerificationReport` - Passivity, causality, reciprocity
//! - `Repository` - Networks keyed by source path, with a mixed-mode cache

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use sparam_core::config::{TdrConfig, TdrMode, WindowType};
use sparam_core::AnalysisError;
use tracing_subscriber::EnvFilter;

mod network;
mod repository;
mod verification;

pub use network::{PyNetwork, PyTdrTrace};
pub use repository::PyRepository;
pub use verification::{PyCheckResult, PyVerificationReport};

/// Engine errors surface as ValueError with the error's message
pub(crate) fn to_py_err(err: AnalysisError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Apply optional mode/window names on top of `base`
pub(crate) fn tdr_config(
    base: &TdrConfig,
    mode: Option<&str>,
    window: Option<&str>,
) -> PyResult<TdrConfig> {
    let mut config = base.clone();
    if let Some(mode) = mode {
        config.mode = TdrMode::from_str(mode).ok_or_else(|| {
            PyValueError::new_err(format!(
                "Invalid TDR mode: {}. Use 'direct' or 'dc'",
                mode
            ))
        })?;
    }
    if let Some(window) = window {
        config.window = WindowType::from_str(window).ok_or_else(|| {
            PyValueError::new_err(format!(
                "Invalid window: {}. Use 'none', 'hamming', 'hanning', 'blackman' or 'kaiser'",
                window
            ))
        })?;
    }
    Ok(config)
}

/// Install a stderr log subscriber
///
/// Args:
///     level: Filter directive such as 'debug' or 'sparam_core=trace'
///         (default: RUST_LOG, then 'warn')
///
/// Returns:
///     False if a subscriber was already installed
#[pyfunction]
#[pyo3(signature = (level=None))]
fn init_logging(level: Option<&str>) -> PyResult<bool> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| PyValueError::new_err(format!("Invalid log filter: {}", e)))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}

/// sparam_python - S-parameter analysis engine
///
/// Example:
///     >>> import numpy as np
///     >>> import sparam_python as sp
///     >>> nw = sp.Network(f, s, z0=50.0, name="board.s4p")
///     >>> f_hz, mag_db, phase_deg = nw.to_mixed_mode().extract("S_dd21")
///     >>> print(nw.verify())
#[pymodule]
fn sparam_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Add classes with clean names (no Py prefix in Python)
    m.add_class::<PyNetwork>()?;
    m.add_class::<PyTdrTrace>()?;
    m.add_class::<PyCheckResult>()?;
    m.add_class::<PyVerificationReport>()?;
    m.add_class::<PyRepository>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
