//! # Corner Detection
//!
//! QuickHull keeps any point it picks as a vertex. A point lying on a flat
//! face or along an edge of the solid can be picked before the corners
//! around it (an axis extreme that ties with a corner, a farthest point
//! that ties with a whole face), and nothing later removes it.
//!
//! ## Crease Test
//!
//! A hull edge is a crease when the two triangles on either side of it are
//! not coplanar within tolerance. Around a true corner at least three
//! creases meet; a point inside a face has none and a point inside an edge
//! has two.

use std::collections::HashMap;

use glam::DVec3;

/// Vertices of `faces` that are not corners of the solid, ascending.
pub(crate) fn flat_vertices(
    points: &[DVec3],
    faces: &[[usize; 3]],
    tolerance: f64,
) -> Vec<usize> {
    let mut opposite: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 3);
    for &[a, b, c] in faces {
        opposite.insert((a, b), c);
        opposite.insert((b, c), a);
        opposite.insert((c, a), b);
    }

    let mut creases: HashMap<usize, usize> = HashMap::new();
    for (&(a, b), &c) in &opposite {
        if a > b {
            continue;
        }
        let crease = match opposite.get(&(b, a)) {
            Some(&d) => {
                off_plane(points, [a, b, c], d, tolerance)
                    || off_plane(points, [b, a, d], c, tolerance)
            }
            // open edge: no neighbor to compare with, keep both ends
            None => true,
        };
        if crease {
            *creases.entry(a).or_default() += 1;
            *creases.entry(b).or_default() += 1;
        }
    }

    let mut flat: Vec<usize> = faces
        .iter()
        .flatten()
        .copied()
        .filter(|v| creases.get(v).copied().unwrap_or(0) < 3)
        .collect();
    flat.sort_unstable();
    flat.dedup();
    flat
}

/// Returns true if `other` is farther than `tolerance` from the plane of
/// `triangle`. Sliver triangles have no reliable plane and always count.
fn off_plane(points: &[DVec3], triangle: [usize; 3], other: usize, tolerance: f64) -> bool {
    let [a, b, c] = triangle.map(|i| points[i]);
    match (b - a).cross(c - a).try_normalize() {
        Some(normal) => normal.dot(points[other] - a).abs() > tolerance,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::quickhull::quickhull;

    const TOL: f64 = 1e-10;

    fn cube_corners() -> Vec<DVec3> {
        (0..8)
            .map(|i: u32| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect()
    }

    fn face_centres() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.5, 0.5),
            DVec3::new(1.0, 0.5, 0.5),
            DVec3::new(0.5, 0.0, 0.5),
            DVec3::new(0.5, 1.0, 0.5),
            DVec3::new(0.5, 0.5, 0.0),
            DVec3::new(0.5, 0.5, 1.0),
        ]
    }

    #[test]
    fn test_cube_corners_are_all_corners() {
        let points = cube_corners();
        let faces = quickhull(&points, TOL).unwrap();
        assert!(flat_vertices(&points, &faces, TOL).is_empty());
    }

    #[test]
    fn test_tetrahedron_has_no_flat_vertices() {
        let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let faces = quickhull(&points, TOL).unwrap();
        assert!(flat_vertices(&points, &faces, TOL).is_empty());
    }

    #[test]
    fn test_face_centres_picked_first_are_flat() {
        let mut points = face_centres();
        points.extend(cube_corners());
        let faces = quickhull(&points, TOL).unwrap();

        let flat = flat_vertices(&points, &faces, TOL);
        assert!(!flat.is_empty());
        // only the centres (indices 0..6) are flagged
        assert!(flat.iter().all(|&i| i < 6));
    }

    #[test]
    fn test_point_inside_an_edge_is_flat() {
        // square pyramid fan around the midpoint of the edge (0,0,0)-(2,0,0)
        let points = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(2.0, 2.0, 0.0),
            DVec3::new(1.0, 1.0, 2.0),
        ];
        let faces = quickhull(&points, TOL).unwrap();
        let flat = flat_vertices(&points, &faces, TOL);
        assert!(flat.iter().all(|&i| i == 0));
    }
}
