//! Python bindings for the network repository

use numpy::{PyArray1, ToPyArray};
use pyo3::prelude::*;
use sparam_core::{AnalysisConfig, NetworkRepository};

use crate::network::{PyNetwork, PyTdrTrace};
use crate::verification::PyVerificationReport;
use crate::{tdr_config, to_py_err};

/// Networks keyed by source path, with a per-source mixed-mode cache
#[pyclass(name = "Repository", frozen)]
pub struct PyRepository {
    // Insertions need exclusive access; analyses share it
    inner: std::sync::RwLock<NetworkRepository>,
    config: AnalysisConfig,
}

impl PyRepository {
    fn read(&self) -> PyResult<std::sync::RwLockReadGuard<'_, NetworkRepository>> {
        self.inner
            .read()
            .map_err(|_| pyo3::exceptions::PyRuntimeError::new_err("repository lock poisoned"))
    }

    fn write(&self) -> PyResult<std::sync::RwLockWriteGuard<'_, NetworkRepository>> {
        self.inner
            .write()
            .map_err(|_| pyo3::exceptions::PyRuntimeError::new_err("repository lock poisoned"))
    }
}

#[pymethods]
impl PyRepository {
    /// Create an empty repository
    ///
    /// Args:
    ///     config: Optional JSON analysis configuration (tolerances, TDR
    ///         mode and window); missing fields take their defaults
    #[new]
    #[pyo3(signature = (config=None))]
    pub fn new(config: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(json) => AnalysisConfig::from_json(json).map_err(to_py_err)?,
            None => AnalysisConfig::default(),
        };
        Ok(Self {
            inner: std::sync::RwLock::new(NetworkRepository::new()),
            config,
        })
    }

    /// Active configuration as JSON
    #[getter]
    pub fn config(&self) -> PyResult<String> {
        self.config.to_json().map_err(to_py_err)
    }

    /// Store a network under `source`, replacing any previous one
    pub fn insert(&self, source: String, network: &PyNetwork) -> PyResult<()> {
        self.write()?.insert(source, network.inner().clone());
        Ok(())
    }

    /// Create and store a network in one step
    #[pyo3(signature = (source, f, s, z0=None, unit=None))]
    pub fn load(
        &self,
        source: String,
        f: numpy::PyReadonlyArray1<'_, f64>,
        s: numpy::PyReadonlyArray3<'_, num_complex::Complex64>,
        z0: Option<f64>,
        unit: Option<&str>,
    ) -> PyResult<()> {
        let z0 = z0.unwrap_or(self.config.z0);
        let network = PyNetwork::new(f, s, z0, Some(source.clone()), unit)?;
        self.insert(source, &network)
    }

    pub fn remove(&self, source: &str) -> PyResult<bool> {
        Ok(self.write()?.remove(source).is_some())
    }

    /// Stored source identities, sorted
    pub fn sources(&self) -> PyResult<Vec<String>> {
        Ok(self
            .read()?
            .sources()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn get(&self, source: &str) -> PyResult<PyNetwork> {
        let network = self.read()?.get(source).map_err(to_py_err)?;
        Ok(PyNetwork::from_shared(network))
    }

    /// Mixed-mode view of `source`, computed once and cached
    pub fn mixed_mode(&self, source: &str) -> PyResult<PyNetwork> {
        let network = self.read()?.mixed_mode(source).map_err(to_py_err)?;
        Ok(PyNetwork::from_shared(network))
    }

    /// (frequency_hz, magnitude_db, phase_deg) of one parameter
    #[pyo3(signature = (source, name, mixed=false))]
    #[allow(clippy::type_complexity)]
    pub fn extract<'py>(
        &self,
        py: Python<'py>,
        source: &str,
        name: &str,
        mixed: bool,
    ) -> PyResult<(
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
    )> {
        let trace = self
            .read()?
            .extract(source, name, mixed)
            .map_err(to_py_err)?;
        Ok((
            trace.frequency.to_pyarray(py),
            trace.magnitude_db.to_pyarray(py),
            trace.phase_deg.to_pyarray(py),
        ))
    }

    /// TDR impedance profiles, reusing the cached mixed-mode view
    #[pyo3(signature = (source, names, mode=None, window=None))]
    pub fn tdr(
        &self,
        source: &str,
        names: Vec<String>,
        mode: Option<&str>,
        window: Option<&str>,
    ) -> PyResult<Vec<PyTdrTrace>> {
        let config = tdr_config(&self.config.tdr, mode, window)?;
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let traces = self
            .read()?
            .tdr(source, &names, &config)
            .map_err(to_py_err)?;
        Ok(traces.into_iter().map(PyTdrTrace::from).collect())
    }

    pub fn verify(&self, source: &str) -> PyResult<PyVerificationReport> {
        self.read()?
            .verify(source, &self.config)
            .map(PyVerificationReport::from)
            .map_err(to_py_err)
    }

    /// Verify every stored network in parallel
    ///
    /// Returns:
    ///     List of (source, report or None, error message or None), sorted
    ///     by source
    pub fn verify_all(
        &self,
        py: Python<'_>,
    ) -> PyResult<Vec<(String, Option<PyVerificationReport>, Option<String>)>> {
        let repo = self.read()?;
        let results = py.allow_threads(|| repo.verify_all(&self.config));
        Ok(results
            .into_iter()
            .map(|(source, result)| match result {
                Ok(report) => (source, Some(report.into()), None),
                Err(e) => (source, None, Some(e.to_string())),
            })
            .collect())
    }

    fn __len__(&self) -> PyResult<usize> {
        Ok(self.read()?.len())
    }

    fn __contains__(&self, source: &str) -> PyResult<bool> {
        Ok(self.read()?.contains(source))
    }
}
