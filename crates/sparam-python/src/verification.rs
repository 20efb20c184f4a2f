//! Python bindings for verification results

use pyo3::prelude::*;
use sparam_core::verification::{CheckResult, VerificationReport};

/// Outcome of one physical-validity check
#[pyclass(name = "CheckResult", frozen)]
pub struct PyCheckResult {
    inner: CheckResult,
}

#[pymethods]
impl PyCheckResult {
    /// 'passivity', 'causality' or 'reciprocity'
    #[getter]
    pub fn kind(&self) -> String {
        self.inner.kind.to_string()
    }

    #[getter]
    pub fn passed(&self) -> bool {
        self.inner.passed
    }

    /// Lowest violating frequency in Hz, None if passed or not applicable
    #[getter]
    pub fn first_violation_hz(&self) -> Option<f64> {
        self.inner.first_violation_hz
    }

    /// Human-readable report text
    #[getter]
    pub fn report(&self) -> String {
        self.inner.to_string()
    }

    fn __bool__(&self) -> bool {
        self.inner.passed
    }

    fn __str__(&self) -> String {
        self.report()
    }

    fn __repr__(&self) -> String {
        format!(
            "CheckResult({}, passed={})",
            self.inner.kind, self.inner.passed
        )
    }
}

impl From<CheckResult> for PyCheckResult {
    fn from(inner: CheckResult) -> Self {
        Self { inner }
    }
}

/// Passivity, causality and reciprocity of one network
#[pyclass(name = "VerificationReport", frozen)]
pub struct PyVerificationReport {
    inner: VerificationReport,
}

#[pymethods]
impl PyVerificationReport {
    #[getter]
    pub fn name(&self) -> Option<String> {
        self.inner.name.clone()
    }

    #[getter]
    pub fn passivity(&self) -> PyCheckResult {
        self.inner.passivity.clone().into()
    }

    #[getter]
    pub fn causality(&self) -> PyCheckResult {
        self.inner.causality.clone().into()
    }

    #[getter]
    pub fn reciprocity(&self) -> PyCheckResult {
        self.inner.reciprocity.clone().into()
    }

    pub fn all_passed(&self) -> bool {
        self.inner.all_passed()
    }

    /// Human-readable report text
    #[getter]
    pub fn report(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.report()
    }

    fn __repr__(&self) -> String {
        format!(
            "VerificationReport({}, all_passed={})",
            self.inner.name.as_deref().unwrap_or("unnamed"),
            self.inner.all_passed()
        )
    }
}

impl From<VerificationReport> for PyVerificationReport {
    fn from(inner: VerificationReport) -> Self {
        Self { inner }
    }
}
