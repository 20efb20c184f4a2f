//! Time-domain reflectometry
//!
//! Turns a reflection parameter into an impedance-versus-time profile.
//!
//! Two transforms are available (see [`TdrMode`]):
//!
//! - **Direct IFFT**: window the measured band, zero-pad to a power of two,
//!   inverse-FFT. The impedance follows the magnitude of the impulse
//!   response, so a discontinuity shows up as a peak and flat line sections
//!   read as Z0. The missing band below the first measured frequency leaves
//!   the profile without a DC level.
//! - **DC extrapolated** (default): resample onto a uniform grid starting at
//!   0 Hz, apply the right half of a symmetric window, build the Hermitian
//!   spectrum and integrate the real impulse response into a step response.
//!   The step response settles to the reflection coefficient of the line, so
//!   the profile reads as absolute impedance.
//!
//! Times are in nanoseconds and restricted to t >= 0. Both modes use the
//! FFT time step `dt = 1 / (n_fft * df)` of the padded transform (numpy
//! `fftfreq` spacing), with `df` the mean spacing of the sweep or grid.
//!
//! The DC-extrapolated grid holds `f_max / df + 1` points, so a narrowband
//! sweep far above 0 Hz needs a large grid; past
//! [`TdrConfig::max_points`] the request fails with `TransformTooLarge`.

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::config::{TdrConfig, TdrMode, WindowType};
use crate::error::{AnalysisError, Result};
use crate::math::fft::{ifft, irfft_hermitian, next_pow2};
use crate::math::window::{half_window, window};
use crate::network::{extrapolate_trace_to_dc, MixedModeLabel, Network, Parameter};

/// Impedance profile for one reflection parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TdrTrace {
    pub parameter: Parameter,
    pub mode: TdrMode,
    pub window: WindowType,
    /// Reference impedance used for the mapping (ohms)
    pub z_ref: f64,
    /// Time axis in ns, starting at 0
    pub time_ns: Vec<f64>,
    /// Impedance in ohms
    pub impedance: Vec<f64>,
    /// Indices of samples whose reflection magnitude reached 1 and was clipped
    pub degenerate: Vec<usize>,
}

impl TdrTrace {
    pub fn len(&self) -> usize {
        self.time_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_ns.is_empty()
    }

    pub fn has_degenerate_samples(&self) -> bool {
        !self.degenerate.is_empty()
    }
}

/// Map a reflection coefficient to impedance: Z = z_ref * (1 + g) / (1 - g)
///
/// |g| >= 1 - eps is clipped to ±(1 - eps). The second value reports
/// whether clipping happened.
pub fn reflection_to_impedance(gamma: f64, z_ref: f64, eps: f64) -> (f64, bool) {
    let limit = 1.0 - eps;
    let (g, clipped) = if gamma.abs() >= limit {
        (limit.copysign(gamma), true)
    } else {
        (gamma, false)
    };
    (z_ref * (1.0 + g) / (1.0 - g), clipped)
}

impl Network {
    /// TDR impedance profiles for the named reflection parameters
    ///
    /// Accepts `Sii` on single-ended networks and `S_dd11` / `S_cc11`. Mixed
    /// labels on a single-ended 4-port route through the mixed-mode
    /// transform once per call.
    ///
    /// # Errors
    /// `EmptyNetwork`, `InsufficientData` (fewer than 2 points),
    /// `InvalidParameter` (unknown or non-reflection name),
    /// `UnsupportedPortCount` (mixed labels on a non-4-port network),
    /// `Config` (invalid `config`) and `TransformTooLarge` (DC grid above
    /// `config.max_points`).
    /// Nothing is returned when any requested parameter fails.
    pub fn tdr(&self, names: &[&str], config: &TdrConfig) -> Result<Vec<TdrTrace>> {
        let params = names
            .iter()
            .map(|name| name.parse::<Parameter>())
            .collect::<Result<Vec<_>>>()?;
        self.tdr_parameters(&params, config)
    }

    /// TDR impedance profiles for parsed parameters
    pub fn tdr_parameters(
        &self,
        params: &[Parameter],
        config: &TdrConfig,
    ) -> Result<Vec<TdrTrace>> {
        let needs_mixed = !self.is_mixed_mode()
            && params.iter().any(|p| matches!(p, Parameter::MixedMode(_)));
        if needs_mixed {
            validate_tdr_request(self, params)?;
            let mixed = self.to_mixed_mode()?;
            tdr_with_mixed(self, Some(&mixed), params, config)
        } else {
            tdr_with_mixed(self, None, params, config)
        }
    }
}

/// TDR with an already computed mixed-mode view of `network`
///
/// The repository uses this to reuse its cached mixed-mode network.
pub(crate) fn tdr_with_mixed(
    network: &Network,
    mixed: Option<&Network>,
    params: &[Parameter],
    config: &TdrConfig,
) -> Result<Vec<TdrTrace>> {
    config.validate()?;
    validate_tdr_request(network, params)?;

    let mut sources = Vec::with_capacity(params.len());
    for param in params {
        let source = match param {
            Parameter::MixedMode(_) if !network.is_mixed_mode() => {
                mixed.ok_or_else(|| {
                    AnalysisError::invalid_parameter(
                        &param.to_string(),
                        "mixed-mode view not available",
                    )
                })?
            }
            _ => network,
        };
        let (i, j) = param.resolve(source)?;
        sources.push((source, i, j));
    }

    params
        .iter()
        .zip(sources)
        .map(|(param, (source, i, j))| {
            let gamma = source.trace(i, j).to_vec();
            let z_ref = reference_impedance(*param, source.z0());
            reflection_profile(*param, source.f(), &gamma, z_ref, config)
        })
        .collect()
}

/// Structural checks shared by every TDR entry point
pub(crate) fn validate_tdr_request(network: &Network, params: &[Parameter]) -> Result<()> {
    network.ensure_not_empty()?;
    if network.nfreq() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: network.nfreq(),
        });
    }
    for param in params {
        if !param.is_reflection() {
            return Err(AnalysisError::invalid_parameter(
                &param.to_string(),
                "TDR requires a reflection parameter",
            ));
        }
        if matches!(param, Parameter::MixedMode(_)) && !network.is_mixed_mode() {
            network.ensure_nports(4)?;
        }
    }
    Ok(())
}

/// Differential lines are referenced to 2 * Z0, common-mode to Z0 / 2
fn reference_impedance(param: Parameter, z0: f64) -> f64 {
    match param {
        Parameter::MixedMode(MixedModeLabel::Sdd11) => 2.0 * z0,
        Parameter::MixedMode(MixedModeLabel::Scc11) => z0 / 2.0,
        _ => z0,
    }
}

fn reflection_profile(
    parameter: Parameter,
    f: &[f64],
    gamma: &[Complex64],
    z_ref: f64,
    config: &TdrConfig,
) -> Result<TdrTrace> {
    let (time_ns, reflection) = match config.mode {
        TdrMode::DirectIfft => direct_response(f, gamma, config)?,
        TdrMode::DcExtrapolated => step_response(f, gamma, config)?,
    };

    let mut degenerate = Vec::new();
    let impedance = reflection
        .iter()
        .enumerate()
        .map(|(k, &g)| {
            let (z, clipped) = reflection_to_impedance(g, z_ref, config.gamma_clip_eps);
            if clipped {
                degenerate.push(k);
            }
            z
        })
        .collect();

    if !degenerate.is_empty() {
        warn!(
            parameter = %parameter,
            samples = degenerate.len(),
            first = degenerate[0],
            "reflection magnitude reached 1; impedance samples clipped"
        );
    }

    Ok(TdrTrace {
        parameter,
        mode: config.mode,
        window: config.window,
        z_ref,
        time_ns,
        impedance,
        degenerate,
    })
}

/// Windowed, zero-padded complex IFFT; returns (t_ns, |Γ(t)|) for t >= 0
fn direct_response(
    f: &[f64],
    gamma: &[Complex64],
    config: &TdrConfig,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = gamma.len();
    let df = (f[n - 1] - f[0]) / (n - 1) as f64;
    let n_fft = next_pow2(n.max(config.min_points))?;
    debug!(points = n, n_fft, df, "direct TDR transform");

    let w = window(config.window, n);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_fft];
    for (k, (g, wk)) in gamma.iter().zip(&w).enumerate() {
        buffer[k] = *g * *wk;
    }
    let response = ifft(&buffer);

    let dt_ns = 1e9 / (n_fft as f64 * df);
    let half = n_fft / 2;
    let time_ns = (0..half).map(|k| k as f64 * dt_ns).collect();
    let magnitude = response[..half].iter().map(|c| c.norm()).collect();
    Ok((time_ns, magnitude))
}

/// Step response of the DC-extrapolated Hermitian spectrum; returns
/// (t_ns, Γ_step(t)) for t >= 0
fn step_response(
    f: &[f64],
    gamma: &[Complex64],
    config: &TdrConfig,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let grid = extrapolate_trace_to_dc(f, gamma, config.max_points)?;

    let m0 = grid.values.len();
    let m = next_pow2(m0.max(config.min_points.div_ceil(2)))?;
    debug!(points = m0, n_fft = 2 * m, df = grid.df, "DC-extrapolated TDR transform");

    let w = half_window(config.window, m0);
    let mut half = vec![Complex64::new(0.0, 0.0); m];
    for (k, (g, wk)) in grid.values.iter().zip(&w).enumerate() {
        half[k] = *g * *wk;
    }
    let impulse = irfft_hermitian(&half);

    // Integrate from the most negative time (index m) through t = 0 (index 0)
    let negative_area: f64 = impulse[m..].iter().sum();
    let mut acc = negative_area;
    let step = impulse[..m]
        .iter()
        .map(|h| {
            acc += h;
            acc
        })
        .collect();

    let dt_ns = 1e9 / (2.0 * m as f64 * grid.df);
    let time_ns = (0..m).map(|k| k as f64 * dt_ns).collect();
    Ok((time_ns, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reflection_to_impedance() {
        let (z, clipped) = reflection_to_impedance(0.0, 50.0, 1e-6);
        assert_eq!(z, 50.0);
        assert!(!clipped);

        let (z, _) = reflection_to_impedance(0.2, 50.0, 1e-6);
        assert_relative_eq!(z, 75.0, epsilon = 1e-12);

        let (z, _) = reflection_to_impedance(-1.0 / 3.0, 50.0, 1e-6);
        assert_relative_eq!(z, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reflection_to_impedance_clips() {
        let (z, clipped) = reflection_to_impedance(1.0, 50.0, 1e-6);
        assert!(clipped);
        assert!(z.is_finite());
        assert_relative_eq!(z, 50.0 * (2.0 - 1e-6) / 1e-6, max_relative = 1e-9);

        let (z, clipped) = reflection_to_impedance(-1.5, 50.0, 1e-6);
        assert!(clipped);
        assert!(z > 0.0 && z < 1e-3);
    }

    #[test]
    fn test_reference_impedance_by_mode() {
        assert_eq!(reference_impedance("S11".parse().unwrap(), 50.0), 50.0);
        assert_eq!(reference_impedance("S_dd11".parse().unwrap(), 50.0), 100.0);
        assert_eq!(reference_impedance("S_cc11".parse().unwrap(), 50.0), 25.0);
    }

    #[test]
    fn test_step_response_settles_to_dc_value() {
        let f: Vec<f64> = (1..=50).map(|k| k as f64 * 1e8).collect();
        let gamma = vec![Complex64::new(0.3, 0.0); 50];
        let (t, step) = step_response(&f, &gamma, &TdrConfig::default()).unwrap();

        assert_eq!(t.len(), step.len());
        assert_eq!(t[0], 0.0);
        for v in &step[step.len() / 4..] {
            assert_relative_eq!(*v, 0.3, epsilon = 2e-3);
        }
    }
}
