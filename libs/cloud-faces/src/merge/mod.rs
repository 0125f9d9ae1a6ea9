//! # Face Merging
//!
//! Groups the triangles of a hull triangulation into maximal planar faces.
//!
//! ## Algorithm
//!
//! 1. Quantize each triangle and compute its unit normal; the quantized
//!    normal is the triangle's normal class
//! 2. Two triangles are neighbors when their six corners reduce to exactly
//!    four distinct (quantized) vertices, i.e. they share one edge
//! 3. Neighbors in the same normal class are unioned; candidate pairs come
//!    from an edge index, so the pass is near linear in triangle count
//! 4. Each group's vertices are deduplicated and ordered into a boundary
//!    loop ([`PolygonOrderer`])
//!
//! Same-class triangles that are not connected through shared edges stay
//! in separate faces.

use std::collections::{HashMap, HashSet};

use cloud_geometry::{GeometryResult, PointKey, Quantizer, Triangle};
use config::constants::QUANTIZE_DIGITS;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::disjoint_set::DisjointSet;
use crate::order::{OrderingMethod, PolygonOrderer};
use crate::polygon::Polygon;

/// How triangle normals are compared when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalGrouping {
    /// Normals must match including direction.
    #[default]
    Signed,
    /// A normal and its negation are the same class.
    Unsigned,
}

/// Merges coplanar, edge-adjacent hull triangles into polygons.
///
/// # Example
///
/// ```rust
/// use cloud_faces::FaceMerger;
/// use cloud_geometry::{ConvexHull, PointCloud};
///
/// let cube = PointCloud::from(vec![
///     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
/// ]);
/// let hull = ConvexHull::compute(&cube).unwrap();
/// let faces = FaceMerger::default().merge(hull.facets()).unwrap();
/// assert_eq!(faces.len(), 6);
/// assert!(faces.iter().all(|f| f.len() == 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMerger {
    quantizer: Quantizer,
    grouping: NormalGrouping,
    orderer: PolygonOrderer,
}

impl Default for FaceMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceMerger {
    /// Creates a merger with default digits, signed grouping and hull ordering.
    pub fn new() -> Self {
        Self {
            quantizer: Quantizer::new(QUANTIZE_DIGITS),
            grouping: NormalGrouping::default(),
            orderer: PolygonOrderer::default(),
        }
    }

    /// Sets the quantization digit count.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.quantizer = Quantizer::new(digits);
        self
    }

    /// Sets the normal comparison mode.
    pub fn with_grouping(mut self, grouping: NormalGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Sets the vertex ordering method.
    pub fn with_ordering(mut self, method: OrderingMethod) -> Self {
        self.orderer = PolygonOrderer::new(method);
        self
    }

    /// Quantized normal class of a triangle, `None` if it has no area.
    pub fn normal_class(&self, triangle: &Triangle) -> Option<PointKey> {
        let normal = self.quantizer.apply(triangle).normal()?;
        let normal = self.quantizer.apply(&normal);
        let normal = match self.grouping {
            NormalGrouping::Signed => normal,
            NormalGrouping::Unsigned => canonical_direction(normal),
        };
        Some(PointKey::exact(normal))
    }

    /// Returns true if `a` and `b` share exactly one edge (four distinct
    /// vertices between them after quantization).
    pub fn are_adjacent(&self, a: &Triangle, b: &Triangle) -> bool {
        let keys: HashSet<PointKey> = a
            .vertices()
            .iter()
            .chain(b.vertices())
            .map(|v| self.quantizer.key(*v))
            .collect();
        keys.len() == 4
    }

    /// Partitions triangle indices into face groups.
    ///
    /// Members are ascending; groups are ordered by their first member.
    pub fn face_groups(&self, triangles: &[Triangle]) -> Vec<Vec<usize>> {
        let classes: Vec<Option<PointKey>> =
            triangles.iter().map(|t| self.normal_class(t)).collect();
        let corners: Vec<[PointKey; 3]> = triangles
            .iter()
            .map(|t| (*t.vertices()).map(|v| self.quantizer.key(v)))
            .collect();

        let mut edges: HashMap<(PointKey, PointKey), Vec<usize>> = HashMap::new();
        for (i, k) in corners.iter().enumerate() {
            for (a, b) in [(k[0], k[1]), (k[1], k[2]), (k[2], k[0])] {
                if a != b {
                    edges.entry(edge_key(a, b)).or_default().push(i);
                }
            }
        }

        let mut sets = DisjointSet::new(triangles.len());
        for sharing in edges.values() {
            for (n, &i) in sharing.iter().enumerate() {
                for &j in &sharing[n + 1..] {
                    if classes[i].is_some()
                        && classes[i] == classes[j]
                        && distinct_corners(&corners[i], &corners[j]) == 4
                    {
                        sets.union(i, j);
                    }
                }
            }
        }

        sets.groups()
    }

    /// Merges `triangles` into polygons, one per face group.
    ///
    /// Vertices keep the coordinates of their first occurrence. Faces of
    /// more than three vertices are wound counter-clockwise seen from the
    /// side their triangles face.
    ///
    /// # Errors
    ///
    /// [`cloud_geometry::GeometryError::DegenerateGeometry`] if a merged
    /// group's vertices are collinear.
    pub fn merge(&self, triangles: &[Triangle]) -> GeometryResult<Vec<Polygon>> {
        let groups = self.face_groups(triangles);

        let mut polygons = Vec::with_capacity(groups.len());
        for group in &groups {
            polygons.push(self.group_polygon(triangles, group)?);
        }

        debug!(
            triangles = triangles.len(),
            faces = polygons.len(),
            merged = polygons.iter().filter(|p| p.len() > 3).count(),
            "Merged coplanar triangles"
        );

        let bent = polygons.iter().filter(|p| p.len() > 3 && !p.is_flat()).count();
        if bent > 0 {
            warn!(bent, "Merged faces are not flat; normal classes are too coarse");
        }

        Ok(polygons)
    }

    fn group_polygon(&self, triangles: &[Triangle], group: &[usize]) -> GeometryResult<Polygon> {
        let mut seen: HashSet<PointKey> = HashSet::new();
        let mut vertices: Vec<DVec3> = Vec::with_capacity(group.len() + 2);
        let mut outward = DVec3::ZERO;

        for &t in group {
            let triangle = &triangles[t];
            outward += triangle.cross();
            for v in triangle.vertices() {
                if seen.insert(self.quantizer.key(*v)) {
                    vertices.push(*v);
                }
            }
        }

        if vertices.len() <= 3 {
            return Ok(Polygon::new(vertices));
        }
        Ok(Polygon::new(self.orderer.order_facing(&vertices, outward)?))
    }
}

/// Merges hull triangles with default settings.
///
/// Shorthand for `FaceMerger::default().merge(triangles)`.
pub fn merge_faces(triangles: &[Triangle]) -> GeometryResult<Vec<Polygon>> {
    FaceMerger::default().merge(triangles)
}

/// Flips `n` so that its first non-zero component is positive.
fn canonical_direction(n: DVec3) -> DVec3 {
    let first = [n.x, n.y, n.z].into_iter().find(|c| *c != 0.0).unwrap_or(0.0);
    if first < 0.0 {
        -n
    } else {
        n
    }
}

#[inline]
fn edge_key(a: PointKey, b: PointKey) -> (PointKey, PointKey) {
    if a < b { (a, b) } else { (b, a) }
}

fn distinct_corners(a: &[PointKey; 3], b: &[PointKey; 3]) -> usize {
    a.iter().chain(b).collect::<HashSet<_>>().len()
}
