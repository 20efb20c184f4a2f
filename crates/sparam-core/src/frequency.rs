//! Frequency module - represents a frequency axis
//!
//! Values are always held in Hz; the unit only affects display scaling.

use crate::error::{AnalysisError, Result};

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Unit label for axis titles
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::THz => "THz",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }
}

/// A frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create from a frequency vector already in Hz
    ///
    /// # Example
    /// ```
    /// use sparam_core::frequency::{Frequency, FrequencyUnit};
    /// let freq = Frequency::from_hz(vec![1e6, 2e6]).with_unit(FrequencyUnit::MHz);
    /// assert_eq!(freq.f_scaled(), vec![1.0, 2.0]);
    /// ```
    pub fn from_hz(f: Vec<f64>) -> Self {
        Self {
            f,
            unit: FrequencyUnit::default(),
        }
    }

    /// Check that all points are finite, non-negative and strictly increasing
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.f.iter().position(|x| !x.is_finite() || *x < 0.0) {
            return Err(AnalysisError::MalformedNetwork(format!(
                "frequency point {} is not a finite non-negative value ({})",
                i, self.f[i]
            )));
        }
        if let Some(i) = self.f.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnalysisError::MalformedNetwork(format!(
                "frequencies must be strictly increasing (index {}: {} Hz -> {} Hz)",
                i + 1,
                self.f[i],
                self.f[i + 1]
            )));
        }
        Ok(())
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the display unit
    pub fn f_scaled(&self) -> Vec<f64> {
        let mult = self.unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Get the start frequency in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        *self.f.first().unwrap_or(&0.0)
    }

    /// Get the stop frequency in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        *self.f.last().unwrap_or(&0.0)
    }

    /// Get the frequency span in Hz
    #[inline]
    pub fn span(&self) -> f64 {
        self.stop() - self.start()
    }

    /// Mean spacing in Hz; equal to `f[1] - f[0]` on a uniform sweep.
    ///
    /// Returns None with fewer than two points.
    pub fn step(&self) -> Option<f64> {
        match self.f.len() {
            0 | 1 => None,
            n => Some(self.span() / (n - 1) as f64),
        }
    }

    /// Get the display unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Same points with another display unit
    pub fn with_unit(mut self, unit: FrequencyUnit) -> Self {
        self.unit = unit;
        self
    }
}
