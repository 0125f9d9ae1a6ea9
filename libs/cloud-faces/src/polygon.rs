//! # Polygon
//!
//! One simplified planar face of the hull: an ordered boundary loop.

use config::constants::{scaled_tolerance, PLANARITY_TOLERANCE};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::predicates::{orient2d, segments_intersect};

/// An ordered loop of coplanar vertices.
///
/// Consecutive vertices (and the last/first pair) are joined by a boundary
/// edge. Serializes as a plain sequence of `[x, y, z]` triples.
///
/// # Example
///
/// ```rust
/// use cloud_faces::Polygon;
/// use glam::DVec3;
///
/// let square = Polygon::new(vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// ]);
/// assert_eq!(square.len(), 4);
/// assert!(square.is_simple());
/// assert_eq!(square.normal(), Some(DVec3::Z));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<DVec3>,
}

impl Polygon {
    /// Creates a polygon from vertices in boundary order.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self { vertices }
    }

    /// Vertices in boundary order.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if there are no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consumes the polygon, returning its vertices.
    pub fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }

    /// Boundary edges as (start, end) pairs, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Area-weighted normal (Newell's method), not normalized.
    ///
    /// Its length is twice the polygon area.
    pub fn newell_normal(&self) -> DVec3 {
        self.edges().fold(DVec3::ZERO, |n, (a, b)| {
            n + DVec3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            )
        })
    }

    /// Unit normal following the winding, `None` for a degenerate loop.
    pub fn normal(&self) -> Option<DVec3> {
        self.newell_normal().try_normalize()
    }

    /// Polygon area.
    pub fn area(&self) -> f64 {
        self.newell_normal().length() * 0.5
    }

    /// Vertex average.
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Returns true if every vertex lies within `tolerance` of the plane
    /// through the centroid with the polygon's normal.
    pub fn is_planar(&self, tolerance: f64) -> bool {
        let Some(normal) = self.normal() else {
            return false;
        };
        let center = self.centroid();
        self.vertices
            .iter()
            .all(|v| normal.dot(*v - center).abs() <= tolerance)
    }

    /// [`Polygon::is_planar`] at [`PLANARITY_TOLERANCE`], scaled by the
    /// largest absolute coordinate.
    pub fn is_flat(&self) -> bool {
        let extent = self
            .vertices
            .iter()
            .fold(0.0_f64, |m, v| m.max(v.abs().max_element()));
        self.is_planar(scaled_tolerance(PLANARITY_TOLERANCE, extent))
    }

    /// Returns true if the boundary loop does not touch or cross itself.
    ///
    /// Checked in the projection that drops the normal's dominant axis.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let Some(normal) = self.normal() else {
            return false;
        };
        let pts: Vec<DVec2> = self
            .vertices
            .iter()
            .map(|v| drop_axis(*v, normal))
            .collect();

        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            let c = pts[(i + 2) % n];
            if a == b {
                return false;
            }
            // adjacent edges may only meet at their shared vertex
            if orient2d(a, b, c) == 0.0 && (b - a).dot(c - b) <= 0.0 {
                return false;
            }
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if segments_intersect(a, b, pts[j], pts[(j + 1) % n]) {
                    return false;
                }
            }
        }
        true
    }
}

impl From<Vec<DVec3>> for Polygon {
    fn from(vertices: Vec<DVec3>) -> Self {
        Self::new(vertices)
    }
}

/// Projects onto the coordinate plane best aligned with `normal`.
fn drop_axis(v: DVec3, normal: DVec3) -> DVec2 {
    let a = normal.abs();
    if a.x >= a.y && a.x >= a.z {
        DVec2::new(v.y, v.z)
    } else if a.y >= a.z {
        DVec2::new(v.z, v.x)
    } else {
        DVec2::new(v.x, v.y)
    }
}
