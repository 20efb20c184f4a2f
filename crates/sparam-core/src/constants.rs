//! Numerical constants for RF calculations
//!
//! Provides standardized tolerance values and other numerical constants
//! used throughout the library.

/// Default reference impedance in ohms.
pub const DEFAULT_Z0: f64 = 50.0;

/// Default passivity tolerance.
/// An eigenvalue of S * S^H fails the check only above 1 + PASSIVITY_TOL,
/// which absorbs floating-point noise on lossless networks.
pub const PASSIVITY_TOL: f64 = 1e-9;

/// Default absolute tolerance for |S_ij - S_ji| in the reciprocity check.
/// Looser than machine precision to tolerate measurement noise.
pub const RECIPROCITY_TOL: f64 = 1e-2;

/// Reflection magnitudes are clipped to 1 - GAMMA_CLIP_EPS before the
/// impedance mapping Z0 * (1 + G) / (1 - G).
pub const GAMMA_CLIP_EPS: f64 = 1e-6;

/// Shape parameter used by the Kaiser window when none is given.
pub const KAISER_BETA: f64 = 6.0;

/// Smallest transform length used by the TDR engine.
pub const MIN_TDR_POINTS: usize = 1024;

/// Largest uniform 0 Hz grid the DC-extrapolated TDR mode will build.
/// The grid length is f_max / df + 1, which a narrowband sweep far above DC
/// drives well past the number of measured points.
pub const MAX_TDR_POINTS: usize = 1 << 20;

/// Upper bound accepted for `min_points` and `max_points` in a TDR
/// configuration. Keeps every power-of-two transform length representable.
pub const TDR_POINTS_LIMIT: usize = 1 << 26;
