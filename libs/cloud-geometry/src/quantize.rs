//! # Quantizer
//!
//! Rounds geometric quantities to a fixed number of decimal places so that
//! values derived from different triangles compare equal when they describe
//! the same plane or the same vertex.
//!
//! Rounding is half-to-even, matching the usual array-library behaviour, and
//! `-0.0` is folded into `0.0` so that hashing agrees with `==`.

use config::constants::{quantize_scale, QUANTIZE_DIGITS};
use glam::DVec3;

use crate::point::Triangle;

/// Rounds `value` to `digits` decimal places.
///
/// Non-finite values are returned unchanged.
///
/// # Example
///
/// ```rust
/// use cloud_geometry::quantize::quantize_f64;
///
/// assert_eq!(quantize_f64(0.1 + 0.2, 12), 0.3);
/// assert_eq!(quantize_f64(2.5, 0), 2.0);
/// ```
#[inline]
pub fn quantize_f64(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = quantize_scale(digits);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round_ties_even() / scale;
    // fold -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Values that can be rounded component-wise.
pub trait Quantize: Sized {
    /// Returns a copy with every floating component rounded to `digits`
    /// decimal places.
    fn quantize(&self, digits: u32) -> Self;
}

impl Quantize for f64 {
    fn quantize(&self, digits: u32) -> Self {
        quantize_f64(*self, digits)
    }
}

impl Quantize for DVec3 {
    fn quantize(&self, digits: u32) -> Self {
        DVec3::new(
            quantize_f64(self.x, digits),
            quantize_f64(self.y, digits),
            quantize_f64(self.z, digits),
        )
    }
}

impl Quantize for Triangle {
    fn quantize(&self, digits: u32) -> Self {
        let [a, b, c] = *self.vertices();
        Triangle::new(a.quantize(digits), b.quantize(digits), c.quantize(digits))
    }
}

impl<T: Quantize> Quantize for Vec<T> {
    fn quantize(&self, digits: u32) -> Self {
        self.iter().map(|v| v.quantize(digits)).collect()
    }
}

/// Rounds any [`Quantize`] value, keeping its shape.
///
/// # Example
///
/// ```rust
/// use cloud_geometry::quantize::quantize;
/// use glam::DVec3;
///
/// let v = quantize(&DVec3::new(1.0000000000001, -0.0, 0.5), 12);
/// assert_eq!(v, DVec3::new(1.0, 0.0, 0.5));
/// ```
pub fn quantize<T: Quantize>(value: &T, digits: u32) -> T {
    value.quantize(digits)
}

/// Hashable identity of a point.
///
/// Built from the bit patterns of the (optionally quantized) coordinates,
/// so two keys are equal exactly when the coordinates compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey([u64; 3]);

impl PointKey {
    /// Key for exact coordinate equality (`-0.0 == 0.0`).
    pub fn exact(point: DVec3) -> Self {
        Self([fold_bits(point.x), fold_bits(point.y), fold_bits(point.z)])
    }

    /// Key for equality after quantizing to `digits` places.
    pub fn quantized(point: DVec3, digits: u32) -> Self {
        Self::exact(point.quantize(digits))
    }
}

#[inline]
fn fold_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Quantizer bound to a digit count.
///
/// # Example
///
/// ```rust
/// use cloud_geometry::Quantizer;
/// use glam::DVec3;
///
/// let q = Quantizer::default();
/// let a = DVec3::new(0.1 + 0.2, 0.0, 0.0);
/// let b = DVec3::new(0.3, 0.0, 0.0);
/// assert_ne!(a, b);
/// assert_eq!(q.key(a), q.key(b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    digits: u32,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(QUANTIZE_DIGITS)
    }
}

impl Quantizer {
    /// Creates a quantizer keeping `digits` decimal places.
    pub fn new(digits: u32) -> Self {
        Self { digits }
    }

    /// Digit count in use.
    #[inline]
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Rounds any quantizable value.
    #[inline]
    pub fn apply<T: Quantize>(&self, value: &T) -> T {
        value.quantize(self.digits)
    }

    /// Hashable key of a point after quantization.
    #[inline]
    pub fn key(&self, point: DVec3) -> PointKey {
        PointKey::quantized(point, self.digits)
    }
}
