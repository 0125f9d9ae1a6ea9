//! # Hull Tests
//!
//! Tests for hull construction on point clouds.

use super::*;
use approx::assert_relative_eq;

fn unit_cube() -> PointCloud {
    PointCloud::from(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ])
}

fn regular_tetrahedron() -> PointCloud {
    PointCloud::from(vec![
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ])
}

#[test]
fn test_hull_unit_cube() {
    let hull = ConvexHull::compute(&unit_cube()).unwrap();
    assert_eq!(hull.vertex_indices(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(hull.facet_count(), 12);
    assert_eq!(hull.facets().len(), 12);
}

#[test]
fn test_hull_regular_tetrahedron() {
    let hull = ConvexHull::compute(&regular_tetrahedron()).unwrap();
    assert_eq!(hull.vertex_count(), 4);
    assert_eq!(hull.facet_count(), 4);
}

#[test]
fn test_hull_facets_copy_input_coordinates() {
    let cloud = unit_cube();
    let hull = ConvexHull::compute(&cloud).unwrap();
    for (simplex, facet) in hull.simplices().iter().zip(hull.facets()) {
        for (k, &idx) in simplex.iter().enumerate() {
            assert_eq!(facet.vertices()[k], cloud[idx]);
        }
    }
}

#[test]
fn test_hull_facet_area_sums_to_surface() {
    let hull = ConvexHull::compute(&unit_cube()).unwrap();
    let area: f64 = hull.facets().iter().map(Triangle::area).sum();
    assert_relative_eq!(area, 6.0, epsilon = 1e-12);
}

#[test]
fn test_hull_interior_points_excluded() {
    let mut points = unit_cube().into_points();
    points.push(DVec3::new(0.5, 0.5, 0.5));
    points.push(DVec3::new(0.25, 0.75, 0.4));
    let cloud = PointCloud::new(points);

    let hull = ConvexHull::compute(&cloud).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert!(!hull.is_vertex(8));
    assert!(!hull.is_vertex(9));
    assert!(hull.is_vertex(6));
}

#[test]
fn test_hull_duplicates_use_first_occurrence() {
    let mut points = unit_cube().into_points();
    points.insert(0, DVec3::new(1.0, 1.0, 1.0));
    let cloud = PointCloud::new(points);

    let hull = ConvexHull::compute(&cloud).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert!(hull.is_vertex(0));
    // the later copy of (1, 1, 1)
    assert!(!hull.is_vertex(7));
}

#[test]
fn test_hull_vertex_points_match_indices() {
    let cloud = regular_tetrahedron();
    let hull = ConvexHull::compute(&cloud).unwrap();
    for (i, p) in hull.vertex_indices().iter().zip(hull.vertex_points()) {
        assert_eq!(cloud[*i], *p);
    }
}

#[test]
fn test_hull_too_few_points() {
    let cloud = PointCloud::from(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]]);
    let err = ConvexHull::compute(&cloud).unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_hull_too_few_distinct_points() {
    let cloud = PointCloud::from(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let err = ConvexHull::compute(&cloud).unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_hull_coplanar_input_is_degenerate() {
    let cloud = PointCloud::from(vec![
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [2.0, 2.0, 0.0],
        [1.0, 1.0, 0.0],
    ]);
    assert!(ConvexHull::compute(&cloud).unwrap_err().is_degenerate());
}

#[test]
fn test_hull_rejects_nan() {
    let mut points = unit_cube().into_points();
    points[3].y = f64::NAN;
    let err = ConvexHull::compute(&PointCloud::new(points)).unwrap_err();
    assert_eq!(err, GeometryError::NonFiniteCoordinate { index: 3 });
}

#[test]
fn test_hull_large_coordinates() {
    let cloud: PointCloud = unit_cube()
        .iter()
        .map(|p| *p * 1.0e6 + DVec3::new(5.0e6, -3.0e6, 1.0e6))
        .collect();
    let hull = ConvexHull::compute(&cloud).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.facet_count(), 12);
}

#[test]
fn test_hull_sphere_samples_all_on_hull() {
    // Fibonacci sphere: every sample is extreme, no four are coplanar
    let n = 60;
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let points: Vec<DVec3> = (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - y * y).sqrt();
            let phi = golden * i as f64;
            DVec3::new(r * phi.cos(), y, r * phi.sin())
        })
        .collect();
    let cloud = PointCloud::new(points);
    let hull = ConvexHull::compute(&cloud).unwrap();
    assert_eq!(hull.vertex_count(), n);
    // closed triangulated sphere: F = 2V - 4
    assert_eq!(hull.facet_count(), 2 * n - 4);
}

#[test]
fn test_hull_face_centres_listed_first_are_not_vertices() {
    // the centres tie with the corners as axis extremes and are seen first
    let mut points = vec![
        DVec3::new(0.0, 0.5, 0.5),
        DVec3::new(1.0, 0.5, 0.5),
        DVec3::new(0.5, 0.0, 0.5),
        DVec3::new(0.5, 1.0, 0.5),
        DVec3::new(0.5, 0.5, 0.0),
        DVec3::new(0.5, 0.5, 1.0),
    ];
    points.extend(unit_cube().iter().copied());
    let hull = ConvexHull::compute(&PointCloud::new(points)).unwrap();

    assert_eq!(hull.vertex_indices(), &[6, 7, 8, 9, 10, 11, 12, 13]);
    assert_eq!(hull.facet_count(), 12);
    assert!((0..6).all(|i| !hull.is_vertex(i)));
    let area: f64 = hull.facets().iter().map(Triangle::area).sum();
    assert_relative_eq!(area, 6.0, epsilon = 1e-12);
}

#[test]
fn test_hull_edge_midpoints_listed_first_are_not_vertices() {
    let cube = unit_cube();
    let corners = cube.points();
    let mut points = Vec::new();
    for (i, a) in corners.iter().enumerate() {
        for b in &corners[i + 1..] {
            // cube edges are the pairs one unit apart
            if (*a - *b).length_squared() == 1.0 {
                points.push((*a + *b) * 0.5);
            }
        }
    }
    assert_eq!(points.len(), 12);
    points.extend(corners.iter().copied());
    let hull = ConvexHull::compute(&PointCloud::new(points)).unwrap();

    assert_eq!(hull.vertex_count(), 8);
    assert!(hull.vertex_indices().iter().all(|&i| i >= 12));
    assert_eq!(hull.facet_count(), 12);
}

#[test]
fn test_hull_small_cloud_far_from_origin() {
    let offset = DVec3::splat(1.0e6);
    let cloud: PointCloud = unit_cube().iter().map(|p| *p * 1.0e-4 + offset).collect();
    let hull = ConvexHull::compute(&cloud).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.facet_count(), 12);
}
