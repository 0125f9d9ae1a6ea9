//! # Polygon Ordering
//!
//! Orders an unordered set of coplanar points into a simple boundary loop.
//!
//! ## Steps
//!
//! 1. Build a local basis in the plane: normal from the first three points,
//!    tangent along the first edge, bitangent = normal x tangent
//! 2. Project every point to 2D (tangent, bitangent) coordinates
//! 3. Order the projected points:
//!    - [`OrderingMethod::ConvexHull`]: monotone-chain 2D hull, exact
//!      orientation tests, collinear boundary points kept
//!    - [`OrderingMethod::Angular`]: angle around the centroid
//!
//! Faces merged from a convex hull are convex, so the hull ordering is exact
//! for them; the angular ordering is the alternate strategy.

use cloud_geometry::{GeometryError, GeometryResult};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::predicates::orient2d;

/// Strategy for ordering a face's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMethod {
    /// Vertices in 2D convex hull order.
    #[default]
    ConvexHull,
    /// Vertices sorted by angle around their centroid.
    Angular,
}

/// Orders coplanar points into a polygon boundary.
///
/// # Example
///
/// ```rust
/// use cloud_faces::{OrderingMethod, PolygonOrderer};
/// use glam::DVec3;
///
/// let scrambled = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// ];
/// let orderer = PolygonOrderer::new(OrderingMethod::ConvexHull);
/// let loop_ = orderer.order_facing(&scrambled, DVec3::Z).unwrap();
/// assert_eq!(loop_.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolygonOrderer {
    method: OrderingMethod,
}

impl PolygonOrderer {
    /// Creates an orderer using `method`.
    pub fn new(method: OrderingMethod) -> Self {
        Self { method }
    }

    /// Method in use.
    #[inline]
    pub fn method(&self) -> OrderingMethod {
        self.method
    }

    /// Orders `vertices` (deduplicated, coplanar) into a boundary loop.
    ///
    /// Three or fewer vertices are returned unchanged. The winding follows
    /// the normal of the first three points.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if all points are collinear.
    pub fn order(&self, vertices: &[DVec3]) -> GeometryResult<Vec<DVec3>> {
        if vertices.len() <= 3 {
            return Ok(vertices.to_vec());
        }
        let basis = PlaneBasis::from_points(vertices)?;
        Ok(self.order_in(&basis, vertices))
    }

    /// Like [`PolygonOrderer::order`], but winds the loop counter-clockwise
    /// as seen from the side `outward` points to.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if all points are collinear.
    pub fn order_facing(&self, vertices: &[DVec3], outward: DVec3) -> GeometryResult<Vec<DVec3>> {
        if vertices.len() <= 3 {
            return Ok(vertices.to_vec());
        }
        let mut basis = PlaneBasis::from_points(vertices)?;
        if basis.normal.dot(outward) < 0.0 {
            basis = basis.flipped();
        }
        Ok(self.order_in(&basis, vertices))
    }

    fn order_in(&self, basis: &PlaneBasis, vertices: &[DVec3]) -> Vec<DVec3> {
        let coords: Vec<DVec2> = vertices.iter().map(|v| basis.project(*v)).collect();

        let order = match self.method {
            OrderingMethod::ConvexHull => match hull_order(&coords) {
                Some(order) => {
                    if order.len() < coords.len() {
                        warn!(
                            dropped = coords.len() - order.len(),
                            "Face has points inside its boundary"
                        );
                    }
                    order
                }
                None => {
                    warn!(points = coords.len(), "2D hull collapsed, using angular order");
                    angular_order(&coords)
                }
            },
            OrderingMethod::Angular => angular_order(&coords),
        };

        order.into_iter().map(|i| vertices[i]).collect()
    }
}

/// Right-handed frame in the plane of a point set.
#[derive(Debug, Clone, Copy)]
struct PlaneBasis {
    origin: DVec3,
    tangent: DVec3,
    bitangent: DVec3,
    normal: DVec3,
}

impl PlaneBasis {
    /// Builds the basis from the first non-collinear triple, trying the
    /// first three points before anything else.
    fn from_points(points: &[DVec3]) -> GeometryResult<Self> {
        let origin = points[0];
        for i in 1..points.len() {
            let edge = points[i] - origin;
            for other in &points[i + 1..] {
                let cross = edge.cross(*other - origin);
                let scale = edge.length() * (*other - origin).length();
                if cross.length() > f64::EPSILON * scale {
                    let normal = cross.normalize();
                    let tangent = edge.normalize();
                    return Ok(Self {
                        origin,
                        tangent,
                        bitangent: normal.cross(tangent),
                        normal,
                    });
                }
            }
        }
        Err(GeometryError::degenerate(
            "cannot order polygon: all points are collinear",
        ))
    }

    fn flipped(self) -> Self {
        Self {
            bitangent: -self.bitangent,
            normal: -self.normal,
            ..self
        }
    }

    #[inline]
    fn project(&self, point: DVec3) -> DVec2 {
        let d = point - self.origin;
        DVec2::new(d.dot(self.tangent), d.dot(self.bitangent))
    }
}

/// Counter-clockwise monotone-chain hull over `coords`, as indices.
///
/// Points on hull edges are kept. Returns `None` if fewer than three
/// points remain or the chains overlap (all points collinear).
fn hull_order(coords: &[DVec2]) -> Option<Vec<usize>> {
    let mut sorted: Vec<usize> = (0..coords.len()).collect();
    sorted.sort_by(|&a, &b| {
        coords[a]
            .x
            .total_cmp(&coords[b].x)
            .then(coords[a].y.total_cmp(&coords[b].y))
            .then(a.cmp(&b))
    });

    let mut lower: Vec<usize> = Vec::with_capacity(coords.len());
    for &i in &sorted {
        while lower.len() >= 2
            && orient2d(
                coords[lower[lower.len() - 2]],
                coords[lower[lower.len() - 1]],
                coords[i],
            ) < 0.0
        {
            lower.pop();
        }
        lower.push(i);
    }

    let mut upper: Vec<usize> = Vec::with_capacity(coords.len());
    for &i in sorted.iter().rev() {
        while upper.len() >= 2
            && orient2d(
                coords[upper[upper.len() - 2]],
                coords[upper[upper.len() - 1]],
                coords[i],
            ) < 0.0
        {
            upper.pop();
        }
        upper.push(i);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    let mut seen = vec![false; coords.len()];
    for &i in &lower {
        if std::mem::replace(&mut seen[i], true) {
            return None;
        }
    }
    (lower.len() >= 3).then_some(lower)
}

/// Indices sorted counter-clockwise by angle around the centroid.
fn angular_order(coords: &[DVec2]) -> Vec<usize> {
    let centroid = coords.iter().copied().sum::<DVec2>() / coords.len() as f64;
    let angles: Vec<f64> = coords
        .iter()
        .map(|c| {
            let d = *c - centroid;
            d.y.atan2(d.x)
        })
        .collect();

    let mut order: Vec<usize> = (0..coords.len()).collect();
    order.sort_by(|&a, &b| angles[a].total_cmp(&angles[b]));
    order
}
