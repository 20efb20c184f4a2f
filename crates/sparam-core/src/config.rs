//! Analysis configuration
//!
//! Tolerances and time-domain settings shared by the verification suite and
//! the TDR engine. Every field defaults to the matching value in
//! [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_Z0, GAMMA_CLIP_EPS, KAISER_BETA, MAX_TDR_POINTS, MIN_TDR_POINTS, PASSIVITY_TOL,
    RECIPROCITY_TOL, TDR_POINTS_LIMIT,
};
use crate::error::{AnalysisError, Result};

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// No window (rectangular)
    None,
    /// Hamming window
    #[default]
    Hamming,
    /// Hann window
    Hanning,
    /// Blackman window
    Blackman,
    /// Kaiser window with shape parameter beta
    Kaiser { beta: f64 },
}

impl WindowType {
    /// Kaiser window with the default shape parameter
    pub fn kaiser() -> Self {
        WindowType::Kaiser { beta: KAISER_BETA }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "rect" | "rectangular" => Some(WindowType::None),
            "hamming" => Some(WindowType::Hamming),
            "hann" | "hanning" => Some(WindowType::Hanning),
            "blackman" => Some(WindowType::Blackman),
            "kaiser" => Some(WindowType::kaiser()),
            _ => None,
        }
    }
}

/// TDR transform mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TdrMode {
    /// Window, zero-pad and inverse-FFT the measured band as-is.
    /// Impedance follows the impulse response magnitude.
    DirectIfft,
    /// Extrapolate linearly down to 0 Hz first, then compute the step
    /// response of the Hermitian (real-valued) transform.
    #[default]
    DcExtrapolated,
}

impl TdrMode {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direct" | "direct_ifft" | "impulse" => Some(TdrMode::DirectIfft),
            "dc" | "dc_extrapolated" | "step" => Some(TdrMode::DcExtrapolated),
            _ => None,
        }
    }
}

/// Time-domain reflectometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdrConfig {
    pub mode: TdrMode,
    pub window: WindowType,
    /// Minimum transform length; rounded up to a power of two.
    pub min_points: usize,
    /// Largest 0 Hz grid built by the DC-extrapolated mode; larger grids
    /// fail with `TransformTooLarge`.
    pub max_points: usize,
    /// Reflection magnitudes at or above `1 - gamma_clip_eps` are clipped.
    pub gamma_clip_eps: f64,
}

impl TdrConfig {
    /// Reject settings the TDR engine cannot run with
    ///
    /// `min_points` and `max_points` are bounded by
    /// [`TDR_POINTS_LIMIT`](crate::constants::TDR_POINTS_LIMIT), and
    /// `min_points` may not exceed `max_points`.
    pub fn validate(&self) -> Result<()> {
        if self.max_points < 2 || self.max_points > TDR_POINTS_LIMIT {
            return Err(AnalysisError::Config(format!(
                "max_points must lie in [2, {}], got {}",
                TDR_POINTS_LIMIT, self.max_points
            )));
        }
        if self.min_points > self.max_points {
            return Err(AnalysisError::Config(format!(
                "min_points ({}) exceeds max_points ({})",
                self.min_points, self.max_points
            )));
        }
        if !(self.gamma_clip_eps > 0.0 && self.gamma_clip_eps < 1.0) {
            return Err(AnalysisError::Config(format!(
                "gamma_clip_eps must lie in (0, 1), got {}",
                self.gamma_clip_eps
            )));
        }
        if let WindowType::Kaiser { beta } = self.window {
            if !(beta.is_finite() && beta >= 0.0) {
                return Err(AnalysisError::Config(format!(
                    "Kaiser beta must be non-negative, got {}",
                    beta
                )));
            }
        }
        Ok(())
    }
}

impl Default for TdrConfig {
    fn default() -> Self {
        Self {
            mode: TdrMode::default(),
            window: WindowType::default(),
            min_points: MIN_TDR_POINTS,
            max_points: MAX_TDR_POINTS,
            gamma_clip_eps: GAMMA_CLIP_EPS,
        }
    }
}

/// Settings for one analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Reference impedance assigned by loaders that do not supply one
    pub z0: f64,
    pub passivity_tol: f64,
    pub reciprocity_tol: f64,
    pub tdr: TdrConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            z0: DEFAULT_Z0,
            passivity_tol: PASSIVITY_TOL,
            reciprocity_tol: RECIPROCITY_TOL,
            tdr: TdrConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Reject settings no analysis can run with
    pub fn validate(&self) -> Result<()> {
        if !(self.z0.is_finite() && self.z0 > 0.0) {
            return Err(AnalysisError::Config(format!(
                "z0 must be positive, got {}",
                self.z0
            )));
        }
        if self.passivity_tol < 0.0 || self.reciprocity_tol < 0.0 {
            return Err(AnalysisError::Config(
                "tolerances must be non-negative".to_string(),
            ));
        }
        self.tdr.validate()
    }
}
