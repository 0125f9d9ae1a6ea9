//! # Configuration Constants
//!
//! Centralized constants for the point cloud analysis pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Quantization and floating-point tolerances
//! - **Hull**: Minimum input sizes for a 3D hull
//! - **Clustering**: Density clustering defaults

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Number of decimal places kept when quantizing coordinates and normals.
///
/// Two geometric quantities derived from different triangles are compared
/// only after rounding to this many places.
///
/// # Example
///
/// ```rust
/// use config::constants::QUANTIZE_DIGITS;
///
/// let scale = 10f64.powi(QUANTIZE_DIGITS as i32);
/// assert_eq!(scale, 1e12);
/// ```
pub const QUANTIZE_DIGITS: u32 = 12;

/// Largest digit count accepted by the quantizer.
///
/// Beyond this `10^digits` no longer fits the f64 mantissa and rounding
/// becomes a no-op.
pub const MAX_QUANTIZE_DIGITS: u32 = 15;

/// Relative tolerance for hull visibility and coplanarity tests.
///
/// Multiplied by the bounding-box diagonal of the input to obtain the
/// absolute distance below which a point counts as lying on a plane. See
/// [`hull_tolerance`].
///
/// # Example
///
/// ```rust
/// use config::constants::HULL_EPSILON;
///
/// let diagonal: f64 = 250.0;
/// let tolerance = HULL_EPSILON * diagonal;
/// assert!(tolerance < 1e-6);
/// ```
pub const HULL_EPSILON: f64 = 1e-10;

/// Number of machine epsilons of the largest coordinate that any hull
/// tolerance covers at least.
///
/// Coordinates far from the origin carry that much representation error no
/// matter how small the cloud is.
pub const ROUNDOFF_ULPS: f64 = 8.0;

/// Tolerance used by planarity checks on finished polygons
/// (`Polygon::is_flat`). The face merger warns about any merged face that
/// fails it.
///
/// Relative to the polygon's extent (see [`scaled_tolerance`]).
pub const PLANARITY_TOLERANCE: f64 = 1e-9;

// =============================================================================
// HULL CONSTANTS
// =============================================================================

/// Minimum number of points for a non-degenerate 3D convex hull.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_HULL_POINTS;
///
/// let points = 3;
/// assert!(points < MIN_HULL_POINTS);
/// ```
pub const MIN_HULL_POINTS: usize = 4;

// =============================================================================
// CLUSTERING CONSTANTS
// =============================================================================

/// Default neighborhood radius for density clustering.
pub const DEFAULT_EPS: f64 = 1.0;

/// Default density threshold (the point itself included).
pub const DEFAULT_MIN_SAMPLES: usize = 2;

// =============================================================================
// HELPERS
// =============================================================================

/// Returns the absolute tolerance for a relative `epsilon` applied to points
/// spanning `extent`.
///
/// # Example
///
/// ```rust
/// use config::constants::{scaled_tolerance, HULL_EPSILON};
///
/// assert_eq!(scaled_tolerance(HULL_EPSILON, 0.5), HULL_EPSILON);
/// assert_eq!(scaled_tolerance(HULL_EPSILON, 100.0), HULL_EPSILON * 100.0);
/// ```
#[inline]
pub fn scaled_tolerance(epsilon: f64, extent: f64) -> f64 {
    epsilon * extent.abs().max(1.0)
}

/// Returns the absolute hull tolerance for a cloud whose bounding box has
/// the given `diagonal` and whose largest absolute coordinate is `extent`.
///
/// The tolerance follows the cloud's own size, floored at the round-off of
/// its coordinates.
///
/// # Example
///
/// ```rust
/// use config::constants::{hull_tolerance, HULL_EPSILON};
///
/// // unit cube at the origin
/// assert_eq!(hull_tolerance(HULL_EPSILON, 3f64.sqrt(), 1.0), HULL_EPSILON * 3f64.sqrt());
///
/// // a 1e-4 cube near 1e6 is limited by round-off, not by its size
/// let far = hull_tolerance(HULL_EPSILON, 1.7e-4, 1.0e6);
/// assert!(far > HULL_EPSILON * 1.7e-4 && far < 1e-8);
/// ```
#[inline]
pub fn hull_tolerance(epsilon: f64, diagonal: f64, extent: f64) -> f64 {
    (epsilon * diagonal.abs()).max(ROUNDOFF_ULPS * f64::EPSILON * extent.abs())
}

/// Returns `10^digits`, the scale factor used by the quantizer.
///
/// Digit counts above [`MAX_QUANTIZE_DIGITS`] are capped.
///
/// # Example
///
/// ```rust
/// use config::constants::quantize_scale;
///
/// assert_eq!(quantize_scale(3), 1000.0);
/// assert_eq!(quantize_scale(40), 1e15);
/// ```
#[inline]
pub fn quantize_scale(digits: u32) -> f64 {
    10f64.powi(digits.min(MAX_QUANTIZE_DIGITS) as i32)
}
