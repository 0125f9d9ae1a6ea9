//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! After Barber, Dobkin and Huhdanpaa (1996).
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points
//!
//! Works on indices into a slice of distinct points; callers map the
//! result back to their own indexing.

use crate::error::{GeometryError, GeometryResult};
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Computes hull faces over `points` (which must be free of duplicates).
///
/// Returns triangles as index triples, counter-clockwise seen from outside.
/// `tolerance` is the absolute distance below which a point counts as lying
/// on a face plane.
pub(crate) fn quickhull(points: &[DVec3], tolerance: f64) -> GeometryResult<Vec<[usize; 3]>> {
    let (faces, interior) = build_initial_simplex(points, tolerance)?;
    let faces = quickhull_iterate(faces, interior, points, tolerance);
    Ok(faces.into_iter().map(|f| f.vertices).collect())
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing unit normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let edge1 = points[v1] - p0;
        let edge2 = points[v2] - p0;
        // zero for slivers, which then never see a point as outside
        let normal = edge1.cross(edge2).normalize_or_zero();
        let distance = normal.dot(p0);

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance,
            outside_points: Vec::new(),
        }
    }

    /// Signed distance from a point to this face's plane.
    #[inline]
    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    #[inline]
    fn is_outside(&self, point: DVec3, tolerance: f64) -> bool {
        self.signed_distance(point) > tolerance
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .max_by(|&&a, &&b| {
                let da = self.signed_distance(points[a]);
                let db = self.signed_distance(points[b]);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .copied()
    }
}

/// Builds the initial tetrahedron and returns it with a strictly interior
/// reference point.
fn build_initial_simplex(
    points: &[DVec3],
    tolerance: f64,
) -> GeometryResult<(Vec<HullFace>, DVec3)> {
    if points.len() < 4 {
        return Err(GeometryError::degenerate(format!(
            "convex hull requires at least 4 distinct points, got {}",
            points.len()
        )));
    }

    let mut min_x = 0;
    let mut max_x = 0;
    let mut min_y = 0;
    let mut max_y = 0;
    let mut min_z = 0;
    let mut max_z = 0;

    for (i, p) in points.iter().enumerate() {
        if p.x < points[min_x].x { min_x = i; }
        if p.x > points[max_x].x { max_x = i; }
        if p.y < points[min_y].y { min_y = i; }
        if p.y > points[max_y].y { max_y = i; }
        if p.z < points[min_z].z { min_z = i; }
        if p.z > points[max_z].z { max_z = i; }
    }

    let extremes = [min_x, max_x, min_y, max_y, min_z, max_z];
    let (p0, p1) = find_farthest_pair(&extremes, points);
    if (points[p1] - points[p0]).length() <= tolerance {
        return Err(GeometryError::degenerate("all points coincide"));
    }

    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    let interior = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, interior, points),
        create_face_outward(p0, p2, p3, interior, points),
        create_face_outward(p0, p3, p1, interior, points),
        create_face_outward(p1, p3, p2, interior, points),
    ];

    let used = [p0, p1, p2, p3];
    for idx in (0..points.len()).filter(|i| !used.contains(i)) {
        assign_to_face(&mut faces, idx, points, tolerance);
    }

    Ok((faces, interior))
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = 0.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = (points[a] - points[b]).length_squared();
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from the line through `p0` and `p1`.
fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> GeometryResult<usize> {
    let line_dir = (points[p1] - points[p0]).normalize();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| GeometryError::degenerate("all points are collinear"))
}

/// Finds the point farthest from the plane through `p0`, `p1`, `p2`.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> GeometryResult<usize> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize();

    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| GeometryError::degenerate("all points are coplanar"))
}

/// Creates a face whose normal points away from `interior`.
fn create_face_outward(
    v0: usize,
    v1: usize,
    v2: usize,
    interior: DVec3,
    points: &[DVec3],
) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    if face.signed_distance(interior) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

/// Puts `idx` into the outside set of the first face that sees it.
fn assign_to_face(faces: &mut [HullFace], idx: usize, points: &[DVec3], tolerance: f64) {
    let point = points[idx];
    if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point, tolerance)) {
        face.outside_points.push(idx);
    }
}

/// Main QuickHull iteration.
///
/// Every pass consumes one outside point as the new apex, so the loop runs
/// at most once per input point.
fn quickhull_iterate(
    mut faces: Vec<HullFace>,
    interior: DVec3,
    points: &[DVec3],
    tolerance: f64,
) -> Vec<HullFace> {
    while let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) {
        let Some(apex) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex_point = points[apex];

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex_point, tolerance))
            .map(|(i, _)| i)
            .collect();

        let horizon = find_horizon_edges(&faces, &visible);

        let mut reassign: Vec<usize> = Vec::new();
        for &idx in &visible {
            reassign.extend(&faces[idx].outside_points);
        }
        reassign.retain(|&p| p != apex);

        // descending, so swap_remove never moves a visible face
        let mut visible_sorted = visible;
        visible_sorted.sort_unstable_by(|a, b| b.cmp(a));
        for idx in visible_sorted {
            faces.swap_remove(idx);
        }

        for (e0, e1) in horizon {
            faces.push(create_face_outward(e0, e1, apex, interior, points));
        }

        for idx in reassign {
            assign_to_face(&mut faces, idx, points, tolerance);
        }
    }

    faces
}

/// Finds horizon edges: edges of visible faces not shared with another
/// visible face. Winding of the visible face is preserved.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for &idx in visible {
        for (a, b) in face_edges(faces[idx].vertices) {
            *edge_count.entry(edge_key(a, b)).or_insert(0) += 1;
        }
    }

    let mut horizon = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for &idx in visible {
        for (a, b) in face_edges(faces[idx].vertices) {
            let key = edge_key(a, b);
            if edge_count[&key] == 1 && seen.insert(key) {
                horizon.push((a, b));
            }
        }
    }

    horizon
}

#[inline]
fn face_edges(v: [usize; 3]) -> [(usize, usize); 3] {
    [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn cube_corners() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_quickhull_tetrahedron() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
            DVec3::new(0.5, 0.5, 1.0),
        ];
        let faces = quickhull(&points, TOL).unwrap();
        assert_eq!(faces.len(), 4);
    }

    #[test]
    fn test_quickhull_cube_faces_point_outward() {
        let points = cube_corners();
        let faces = quickhull(&points, TOL).unwrap();
        assert_eq!(faces.len(), 12);

        let center = DVec3::splat(0.5);
        for [a, b, c] in faces {
            let normal = (points[b] - points[a]).cross(points[c] - points[a]);
            assert!(normal.dot(points[a] - center) > 0.0);
        }
    }

    #[test]
    fn test_quickhull_ignores_interior_point() {
        let mut points = cube_corners();
        points.push(DVec3::splat(0.5));
        let faces = quickhull(&points, TOL).unwrap();
        assert_eq!(faces.len(), 12);
        assert!(faces.iter().all(|f| !f.contains(&8)));
    }

    #[test]
    fn test_horizon_edges_of_single_face() {
        let points = cube_corners();
        let faces = vec![HullFace::new(0, 1, 2, &points)];
        let horizon = find_horizon_edges(&faces, &[0]);
        assert_eq!(horizon, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_horizon_edges_drop_shared_edge() {
        let points = cube_corners();
        let faces = vec![
            HullFace::new(0, 1, 2, &points),
            HullFace::new(0, 2, 3, &points),
        ];
        let horizon = find_horizon_edges(&faces, &[0, 1]);
        assert_eq!(horizon.len(), 4);
        assert!(!horizon.contains(&(2, 0)));
        assert!(!horizon.contains(&(0, 2)));
    }

    #[test]
    fn test_collinear_points_rejected() {
        let points: Vec<DVec3> = (0..6).map(|i| DVec3::splat(i as f64)).collect();
        let err = quickhull(&points, TOL).unwrap_err();
        assert!(err.to_string().contains("collinear"));
    }

    #[test]
    fn test_coplanar_points_rejected() {
        let points = vec![
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 0.0, 2.0),
            DVec3::new(0.0, 1.0, 2.0),
            DVec3::new(1.0, 1.0, 2.0),
            DVec3::new(0.3, 0.7, 2.0),
        ];
        let err = quickhull(&points, TOL).unwrap_err();
        assert!(err.to_string().contains("coplanar"));
    }
}
