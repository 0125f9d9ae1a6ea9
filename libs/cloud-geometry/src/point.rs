//! # Point Cloud Types
//!
//! One frame's points and the triangles the hull is made of.
//!
//! All coordinates are `f64` (`glam::DVec3`). Point order is kept exactly as
//! supplied, since it is carried through to the analysis output.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// A single 3D point.
pub type Point3 = DVec3;

/// An ordered set of points belonging to one time frame.
///
/// Serializes as a plain sequence of `[x, y, z]` triples.
///
/// # Example
///
/// ```rust
/// use cloud_geometry::PointCloud;
///
/// let cloud = PointCloud::from(vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
/// assert_eq!(cloud.len(), 2);
/// assert_eq!(cloud[1].z, 3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCloud {
    points: Vec<DVec3>,
}

impl PointCloud {
    /// Creates a cloud from points.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Creates a cloud from a flat `[x0, y0, z0, x1, ...]` buffer.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidInput`] when the length is not a multiple of 3.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cloud_geometry::PointCloud;
    ///
    /// let cloud = PointCloud::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
    /// assert_eq!(cloud.len(), 2);
    /// assert!(PointCloud::from_flat(&[0.0, 1.0]).is_err());
    /// ```
    pub fn from_flat(coords: &[f64]) -> GeometryResult<Self> {
        if coords.len() % 3 != 0 {
            return Err(GeometryError::invalid_input(format!(
                "flat coordinate buffer length {} is not a multiple of 3",
                coords.len()
            )));
        }
        Ok(Self {
            points: coords
                .chunks_exact(3)
                .map(|c| DVec3::new(c[0], c[1], c[2]))
                .collect(),
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DVec3> {
        self.points.iter()
    }

    /// Consumes the cloud, returning its points.
    pub fn into_points(self) -> Vec<DVec3> {
        self.points
    }

    /// Checks that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NonFiniteCoordinate`] naming the first bad point.
    pub fn validate(&self) -> GeometryResult<()> {
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(GeometryError::NonFiniteCoordinate { index }),
            None => Ok(()),
        }
    }

    /// Largest absolute coordinate value, 0 for an empty cloud.
    pub fn extent(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.abs().max_element())
            .fold(0.0, f64::max)
    }

    /// Returns the axis-aligned bounding box (min, max).
    ///
    /// `None` for an empty cloud.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }
}

impl std::ops::Index<usize> for PointCloud {
    type Output = DVec3;

    fn index(&self, index: usize) -> &DVec3 {
        &self.points[index]
    }
}

impl From<Vec<DVec3>> for PointCloud {
    fn from(points: Vec<DVec3>) -> Self {
        Self::new(points)
    }
}

impl From<Vec<[f64; 3]>> for PointCloud {
    fn from(points: Vec<[f64; 3]>) -> Self {
        Self::new(points.into_iter().map(DVec3::from_array).collect())
    }
}

impl FromIterator<DVec3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a DVec3;
    type IntoIter = std::slice::Iter<'a, DVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A hull facet: three points, counter-clockwise when seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triangle {
    vertices: [DVec3; 3],
}

impl Triangle {
    /// Creates a triangle from three corners.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the corners.
    #[inline]
    pub fn vertices(&self) -> &[DVec3; 3] {
        &self.vertices
    }

    /// Unnormalized normal, `(b - a) x (c - a)`.
    #[inline]
    pub fn cross(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a)
    }

    /// Unit normal, `None` for a zero-area triangle.
    pub fn normal(&self) -> Option<DVec3> {
        self.cross().try_normalize()
    }

    /// Triangle area.
    pub fn area(&self) -> f64 {
        self.cross().length() * 0.5
    }

    /// Centroid of the three corners.
    pub fn centroid(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}
