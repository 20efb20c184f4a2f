//! Python bindings for Network and TDR traces

use std::sync::Arc;

use num_complex::Complex64;
use numpy::{PyArray1, PyArray2, PyArray3, PyReadonlyArray1, PyReadonlyArray3, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use sparam_core::config::TdrConfig;
use sparam_core::frequency::{Frequency, FrequencyUnit};
use sparam_core::network::Network;
use sparam_core::tdr::TdrTrace;
use sparam_core::verification::{
    check_causality, check_passivity, check_reciprocity, power_eigenvalues, verify,
};
use sparam_core::AnalysisConfig;

use crate::verification::{PyCheckResult, PyVerificationReport};
use crate::{tdr_config, to_py_err};

/// Python wrapper for Network
#[pyclass(name = "Network", frozen)]
pub struct PyNetwork {
    inner: Arc<Network>,
}

#[pymethods]
impl PyNetwork {
    /// Create a Network from parsed S-parameter data
    ///
    /// Args:
    ///     f: Frequencies in Hz, strictly increasing, shape [N]
    ///     s: Complex S-parameters, shape [N, P, P]
    ///     z0: Reference impedance in ohms (default: 50)
    ///     name: Display name, typically the file name
    ///     unit: Display unit for plot axes: 'Hz', 'kHz', 'MHz', 'GHz'
    ///         (default) or 'THz'. `f` is always given in Hz.
    #[new]
    #[pyo3(signature = (f, s, z0=50.0, name=None, unit=None))]
    pub fn new(
        f: PyReadonlyArray1<'_, f64>,
        s: PyReadonlyArray3<'_, Complex64>,
        z0: f64,
        name: Option<String>,
        unit: Option<&str>,
    ) -> PyResult<Self> {
        let unit = match unit {
            Some(u) => FrequencyUnit::from_str(u).ok_or_else(|| {
                PyValueError::new_err(format!(
                    "Invalid frequency unit: {}. Use 'Hz', 'kHz', 'MHz', 'GHz' or 'THz'",
                    u
                ))
            })?,
            None => FrequencyUnit::default(),
        };
        let frequency = Frequency::from_hz(f.as_array().to_vec()).with_unit(unit);
        let s = s.as_array().to_owned();
        let mut network = Network::new(frequency, s, z0).map_err(to_py_err)?;
        if let Some(name) = name {
            network = network.with_name(name);
        }
        Ok(Self::from_network(network))
    }

    /// Get S-parameters as complex numpy array [nfreq, nports, nports]
    #[getter]
    pub fn s<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<Complex64>> {
        self.inner.s().to_pyarray(py)
    }

    /// Get frequency array in Hz as numpy array
    #[getter]
    pub fn f<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.f().to_pyarray(py)
    }

    /// Frequencies in the display unit, for plot axes
    #[getter]
    pub fn f_scaled<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.frequency().f_scaled().to_pyarray(py)
    }

    /// Display unit label, e.g. 'GHz'
    #[getter]
    pub fn unit(&self) -> &'static str {
        self.inner.frequency().unit().label()
    }

    /// Reference impedance in ohms
    #[getter]
    pub fn z0(&self) -> f64 {
        self.inner.z0()
    }

    /// Number of ports
    #[getter]
    pub fn nports(&self) -> usize {
        self.inner.nports()
    }

    /// Number of frequency points
    #[getter]
    pub fn nfreq(&self) -> usize {
        self.inner.nfreq()
    }

    /// Network name
    #[getter]
    pub fn name(&self) -> Option<String> {
        self.inner.name().map(str::to_string)
    }

    /// 'single-ended' or 'mixed-mode'
    #[getter]
    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    /// Names accepted by `extract`
    pub fn available_parameters(&self) -> Vec<String> {
        self.inner
            .available_parameters()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    /// Magnitude and phase of one parameter
    ///
    /// Args:
    ///     name: 'S21' style on single-ended networks, 'S_dd21' style on
    ///         mixed-mode networks
    ///
    /// Returns:
    ///     (frequency_hz, magnitude_db, phase_deg)
    #[allow(clippy::type_complexity)]
    pub fn extract<'py>(
        &self,
        py: Python<'py>,
        name: &str,
    ) -> PyResult<(
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
    )> {
        let trace = self.inner.extract(name).map_err(to_py_err)?;
        Ok((
            trace.frequency.to_pyarray(py),
            trace.magnitude_db.to_pyarray(py),
            trace.phase_deg.to_pyarray(py),
        ))
    }

    /// Convert a single-ended 4-port to mixed-mode [d1, d2, c1, c2]
    pub fn to_mixed_mode(&self) -> PyResult<Self> {
        self.inner
            .to_mixed_mode()
            .map(Self::from_network)
            .map_err(to_py_err)
    }

    /// Convert a mixed-mode network back to single-ended
    pub fn to_single_ended(&self) -> PyResult<Self> {
        self.inner
            .to_single_ended()
            .map(Self::from_network)
            .map_err(to_py_err)
    }

    /// TDR impedance profiles
    ///
    /// Args:
    ///     names: Reflection parameters, e.g. ['S11', 'S_dd11']
    ///     mode: 'dc' (DC-extrapolated step, default) or 'direct'
    ///     window: 'hamming' (default), 'hanning', 'blackman', 'kaiser', 'none'
    #[pyo3(signature = (names, mode=None, window=None))]
    pub fn tdr(
        &self,
        names: Vec<String>,
        mode: Option<&str>,
        window: Option<&str>,
    ) -> PyResult<Vec<PyTdrTrace>> {
        let config = tdr_config(&TdrConfig::default(), mode, window)?;
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let traces = self.inner.tdr(&names, &config).map_err(to_py_err)?;
        Ok(traces.into_iter().map(PyTdrTrace::from).collect())
    }

    /// Check passivity
    ///
    /// Args:
    ///     tol: Allowed excess of the largest S*S^H eigenvalue over 1
    ///         (default: 1e-9)
    #[pyo3(signature = (tol=None))]
    pub fn check_passivity(&self, tol: Option<f64>) -> PyResult<PyCheckResult> {
        check_passivity(&self.inner, tol)
            .map(PyCheckResult::from)
            .map_err(to_py_err)
    }

    /// Time-origin causality heuristic
    pub fn check_causality(&self) -> PyResult<PyCheckResult> {
        check_causality(&self.inner)
            .map(PyCheckResult::from)
            .map_err(to_py_err)
    }

    /// Check reciprocity
    ///
    /// Args:
    ///     tol: Largest allowed |S_ij - S_ji| (default: 1e-2)
    #[pyo3(signature = (tol=None))]
    pub fn check_reciprocity(&self, tol: Option<f64>) -> PyResult<PyCheckResult> {
        check_reciprocity(&self.inner, tol)
            .map(PyCheckResult::from)
            .map_err(to_py_err)
    }

    /// Run all three checks
    #[pyo3(signature = (passivity_tol=None, reciprocity_tol=None))]
    pub fn verify(
        &self,
        passivity_tol: Option<f64>,
        reciprocity_tol: Option<f64>,
    ) -> PyResult<PyVerificationReport> {
        let mut config = AnalysisConfig::default();
        if let Some(tol) = passivity_tol {
            config.passivity_tol = tol;
        }
        if let Some(tol) = reciprocity_tol {
            config.reciprocity_tol = tol;
        }
        verify(&self.inner, &config)
            .map(PyVerificationReport::from)
            .map_err(to_py_err)
    }

    /// Eigenvalues of S*S^H per frequency, shape [nfreq, nports]
    pub fn power_eigenvalues<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        power_eigenvalues(&self.inner)
            .map(|eigs| eigs.to_pyarray(py))
            .map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        let name = self.name().unwrap_or_else(|| "unnamed".to_string());
        let f = self.inner.frequency().f_scaled();
        let unit = self.unit();
        match (f.first(), f.last()) {
            (Some(start), Some(stop)) => format!(
                "Network('{}', {} ports, {}, {} freqs, {:.3} {} - {:.3} {})",
                name,
                self.nports(),
                self.inner.mode(),
                self.nfreq(),
                start,
                unit,
                stop,
                unit
            ),
            _ => format!("Network('{}', {} ports, empty)", name, self.nports()),
        }
    }
}

impl PyNetwork {
    /// Get the inner Network reference (for internal use)
    pub fn inner(&self) -> &Network {
        &self.inner
    }

    /// Create from existing Network
    pub fn from_network(network: Network) -> Self {
        Self {
            inner: Arc::new(network),
        }
    }

    pub(crate) fn from_shared(network: Arc<Network>) -> Self {
        Self { inner: network }
    }
}

/// Python wrapper for a TDR impedance profile
#[pyclass(name = "TdrTrace", frozen)]
pub struct PyTdrTrace {
    inner: TdrTrace,
}

#[pymethods]
impl PyTdrTrace {
    /// Parameter name, e.g. 'S_dd11'
    #[getter]
    pub fn parameter(&self) -> String {
        self.inner.parameter.to_string()
    }

    /// Time axis in ns
    #[getter]
    pub fn time_ns<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.time_ns.to_pyarray(py)
    }

    /// Impedance in ohms
    #[getter]
    pub fn impedance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.impedance.to_pyarray(py)
    }

    /// Reference impedance used for the mapping
    #[getter]
    pub fn z_ref(&self) -> f64 {
        self.inner.z_ref
    }

    /// Indices of clipped samples
    #[getter]
    pub fn degenerate(&self) -> Vec<usize> {
        self.inner.degenerate.clone()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "TdrTrace('{}', {:?}, {} samples, z_ref={} ohm)",
            self.inner.parameter,
            self.inner.mode,
            self.inner.len(),
            self.inner.z_ref
        )
    }
}

impl From<TdrTrace> for PyTdrTrace {
    fn from(inner: TdrTrace) -> Self {
        Self { inner }
    }
}
