//! # Convex Hull
//!
//! QuickHull algorithm for computing the 3D convex hull of a point cloud.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Output
//!
//! Hull vertices are reported as indices into the input cloud (ascending),
//! and facets as triangles copied from the input coordinates. Exact
//! duplicate points are represented by their first occurrence.
//!
//! Only true corners are hull vertices. Points lying on a flat face or
//! along an edge of the hull (within tolerance) are reported as interior,
//! whatever their position in the input.

mod corners;
mod quickhull;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use config::constants::{hull_tolerance, HULL_EPSILON, MIN_HULL_POINTS};
use glam::DVec3;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::point::{PointCloud, Triangle};
use crate::quantize::PointKey;

/// The convex hull of one point cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    /// Input indices of hull vertices, ascending
    vertices: Vec<usize>,
    /// Input indices of each facet, counter-clockwise from outside
    simplices: Vec<[usize; 3]>,
    /// Facets with coordinates copied from the input
    facets: Vec<Triangle>,
    /// Hull vertex coordinates, same order as `vertices`
    vertex_points: Vec<DVec3>,
}

impl ConvexHull {
    /// Computes the hull with the default tolerance.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] for fewer than 4 distinct
    /// points or collinear/coplanar input, and
    /// [`GeometryError::NonFiniteCoordinate`] for NaN or infinite input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cloud_geometry::{ConvexHull, PointCloud};
    ///
    /// let cloud = PointCloud::from(vec![
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    ///     [0.1, 0.1, 0.1],
    /// ]);
    /// let hull = ConvexHull::compute(&cloud).unwrap();
    /// assert_eq!(hull.vertex_indices(), &[0, 1, 2, 3]);
    /// assert_eq!(hull.facet_count(), 4);
    /// ```
    pub fn compute(cloud: &PointCloud) -> GeometryResult<Self> {
        ConvexHullBuilder::default().build(cloud)
    }

    /// Input indices of the hull vertices, ascending.
    #[inline]
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertices
    }

    /// Hull vertex coordinates, in input order.
    #[inline]
    pub fn vertex_points(&self) -> &[DVec3] {
        &self.vertex_points
    }

    /// Facets as input index triples.
    #[inline]
    pub fn simplices(&self) -> &[[usize; 3]] {
        &self.simplices
    }

    /// Facets as triangles.
    #[inline]
    pub fn facets(&self) -> &[Triangle] {
        &self.facets
    }

    /// Number of hull vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.simplices.len()
    }

    /// Returns true if input point `index` is a hull vertex.
    pub fn is_vertex(&self, index: usize) -> bool {
        self.vertices.binary_search(&index).is_ok()
    }
}

/// Builds [`ConvexHull`]s with a configurable relative tolerance.
///
/// The absolute tolerance is the relative one times the bounding-box
/// diagonal, floored at the round-off of the coordinates.
///
/// # Example
///
/// ```rust
/// use cloud_geometry::{ConvexHullBuilder, PointCloud};
///
/// let cloud = PointCloud::from(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
/// let err = ConvexHullBuilder::default().build(&cloud).unwrap_err();
/// assert!(err.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexHullBuilder {
    epsilon: f64,
}

impl Default for ConvexHullBuilder {
    fn default() -> Self {
        Self {
            epsilon: HULL_EPSILON,
        }
    }
}

impl ConvexHullBuilder {
    /// Creates a builder with the default tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relative coplanarity tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Computes the convex hull of `cloud`.
    ///
    /// # Errors
    ///
    /// See [`ConvexHull::compute`].
    pub fn build(&self, cloud: &PointCloud) -> GeometryResult<ConvexHull> {
        if cloud.len() < MIN_HULL_POINTS {
            return Err(GeometryError::degenerate(format!(
                "convex hull requires at least {MIN_HULL_POINTS} points, got {}",
                cloud.len()
            )));
        }
        cloud.validate()?;

        let (unique, mut origin) = collapse_duplicates(cloud.points());
        let Some((lo, hi)) = cloud.bounding_box() else {
            return Err(GeometryError::degenerate("empty point cloud"));
        };
        let tolerance = hull_tolerance(self.epsilon, (hi - lo).length(), cloud.extent());

        // work relative to the box center so distances keep full precision
        let center = (lo + hi) * 0.5;
        let mut local: Vec<DVec3> = unique.iter().map(|p| *p - center).collect();

        let faces = loop {
            let faces = quickhull::quickhull(&local, tolerance)?;
            let flat = corners::flat_vertices(&local, &faces, tolerance);
            if flat.is_empty() {
                break faces;
            }

            // the remaining corners span the same solid; rebuild from them alone
            let mut keep: Vec<usize> = faces.iter().flatten().copied().collect();
            keep.sort_unstable();
            keep.dedup();
            keep.retain(|i| flat.binary_search(i).is_err());
            debug!(
                dropped = flat.len(),
                corners = keep.len(),
                "Dropping hull vertices that lie on a face or edge"
            );

            local = keep.iter().map(|&i| local[i]).collect();
            origin = keep.iter().map(|&i| origin[i]).collect();
        };

        let simplices: Vec<[usize; 3]> = faces
            .iter()
            .map(|f| [origin[f[0]], origin[f[1]], origin[f[2]]])
            .collect();

        let mut vertices: Vec<usize> = simplices.iter().flatten().copied().collect();
        vertices.sort_unstable();
        vertices.dedup();

        let facets = simplices
            .iter()
            .map(|&[a, b, c]| Triangle::new(cloud[a], cloud[b], cloud[c]))
            .collect();
        let vertex_points = vertices.iter().map(|&i| cloud[i]).collect();

        debug!(
            points = cloud.len(),
            distinct = unique.len(),
            hull_vertices = vertices.len(),
            facets = simplices.len(),
            "Computed convex hull"
        );

        Ok(ConvexHull {
            vertices,
            simplices,
            facets,
            vertex_points,
        })
    }
}

/// Drops exact duplicates, keeping first occurrences.
///
/// Returns the distinct points and, for each, its index in `points`.
fn collapse_duplicates(points: &[DVec3]) -> (Vec<DVec3>, Vec<usize>) {
    let mut first_seen: HashMap<PointKey, usize> = HashMap::with_capacity(points.len());
    let mut unique = Vec::with_capacity(points.len());
    let mut origin = Vec::with_capacity(points.len());

    for (i, p) in points.iter().enumerate() {
        first_seen.entry(PointKey::exact(*p)).or_insert_with(|| {
            unique.push(*p);
            origin.push(i);
            i
        });
    }

    (unique, origin)
}

/// Computes the convex hull of `cloud` with default settings.
///
/// Shorthand for [`ConvexHull::compute`].
pub fn convex_hull(cloud: &PointCloud) -> GeometryResult<ConvexHull> {
    ConvexHull::compute(cloud)
}
