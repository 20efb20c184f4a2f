//! Core Network struct and constructors
//!
//! Contains the fundamental Network data structure and its validity
//! invariants. A Network is immutable once built; derived representations
//! are new instances.

use std::fmt;

use ndarray::{s, Array1, Array3, ArrayView2};
use num_complex::Complex64;

use crate::error::{AnalysisError, Result};
use crate::frequency::Frequency;

/// Meaning of the matrix indices of a Network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PortMode {
    /// Index i is physical port i + 1
    #[default]
    SingleEnded,
    /// 4-port differential/common-mode basis ordered [d1, d2, c1, c2]
    MixedMode,
}

impl fmt::Display for PortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortMode::SingleEnded => write!(f, "single-ended"),
            PortMode::MixedMode => write!(f, "mixed-mode"),
        }
    }
}

/// An N-port electrical network
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    /// Frequency axis
    frequency: Frequency,
    /// S-parameter data [nfreq, nports, nports]
    s: Array3<Complex64>,
    /// Reference impedance (ohms, all ports)
    z0: f64,
    /// Index convention of `s`
    mode: PortMode,
    /// Network name
    name: Option<String>,
}

impl Network {
    /// Create a single-ended Network from S-parameters
    ///
    /// # Errors
    /// `MalformedNetwork` if the matrices are not square, the frequency count
    /// does not match the S-parameter data, frequencies are not strictly
    /// increasing, any value is non-finite, or `z0` is not positive.
    ///
    /// A zero-point network is accepted here so that an empty loader result
    /// can be represented; every analysis rejects it with `EmptyNetwork`.
    pub fn new(frequency: Frequency, s: Array3<Complex64>, z0: f64) -> Result<Self> {
        let (nfreq, rows, cols) = s.dim();
        if rows != cols {
            return Err(AnalysisError::MalformedNetwork(format!(
                "S-matrices must be square, got {}x{}",
                rows, cols
            )));
        }
        if rows == 0 {
            return Err(AnalysisError::MalformedNetwork(
                "network must have at least one port".to_string(),
            ));
        }
        if frequency.npoints() != nfreq {
            return Err(AnalysisError::MalformedNetwork(format!(
                "{} frequency points but {} S-matrices",
                frequency.npoints(),
                nfreq
            )));
        }
        frequency.validate()?;
        if !(z0.is_finite() && z0 > 0.0) {
            return Err(AnalysisError::MalformedNetwork(format!(
                "reference impedance must be positive, got {}",
                z0
            )));
        }
        if let Some(((f, i, j), _)) = s
            .indexed_iter()
            .find(|(_, c)| !(c.re.is_finite() && c.im.is_finite()))
        {
            return Err(AnalysisError::MalformedNetwork(format!(
                "non-finite S[{}, {}] at frequency index {}",
                i + 1,
                j + 1,
                f
            )));
        }

        Ok(Self {
            frequency,
            s,
            z0,
            mode: PortMode::SingleEnded,
            name: None,
        })
    }

    /// Create from a frequency vector in Hz
    pub fn from_hz(f: Vec<f64>, s: Array3<Complex64>, z0: f64) -> Result<Self> {
        Self::new(Frequency::from_hz(f), s, z0)
    }

    /// Attach a display name (typically the source file name)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Internal: new network sharing this one's axis, impedance and name
    pub(crate) fn derive(&self, s: Array3<Complex64>, mode: PortMode) -> Self {
        Self {
            frequency: self.frequency.clone(),
            s,
            z0: self.z0,
            mode,
            name: self.name.clone(),
        }
    }

    /// Internal: same network on a new frequency axis
    pub(crate) fn resample(&self, frequency: Frequency, s: Array3<Complex64>) -> Self {
        Self {
            frequency,
            s,
            z0: self.z0,
            mode: self.mode,
            name: self.name.clone(),
        }
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.s.shape()[0]
    }

    /// Get frequency object
    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        self.frequency.f()
    }

    /// Get S-parameters
    #[inline]
    pub fn s(&self) -> &Array3<Complex64> {
        &self.s
    }

    /// S-matrix at frequency index `k`
    #[inline]
    pub fn s_at(&self, k: usize) -> ArrayView2<'_, Complex64> {
        self.s.slice(s![k, .., ..])
    }

    /// Get reference impedance
    #[inline]
    pub fn z0(&self) -> f64 {
        self.z0
    }

    #[inline]
    pub fn mode(&self) -> PortMode {
        self.mode
    }

    #[inline]
    pub fn is_mixed_mode(&self) -> bool {
        self.mode == PortMode::MixedMode
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// S_ij over frequency (zero-based indices)
    pub fn trace(&self, i: usize, j: usize) -> Array1<Complex64> {
        self.s.slice(s![.., i, j]).to_owned()
    }

    /// Fail with `EmptyNetwork` when there are no frequency points
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.nfreq() == 0 {
            return Err(AnalysisError::EmptyNetwork);
        }
        Ok(())
    }

    /// Fail with `UnsupportedPortCount` unless the network has `required` ports
    pub fn ensure_nports(&self, required: usize) -> Result<()> {
        if self.nports() != required {
            return Err(AnalysisError::UnsupportedPortCount {
                required,
                actual: self.nports(),
            });
        }
        Ok(())
    }
}
