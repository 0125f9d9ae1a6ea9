//! Property-based tests over random point clouds.
//!
//! Run with: cargo test -p cloud-analyzer -- proptest

use std::collections::HashSet;

use cloud_analyzer::{AnalyzerOptions, PointCloud, PointCloudAnalyzer};
use cloud_geometry::PointKey;
use config::constants::{scaled_tolerance, PLANARITY_TOLERANCE};
use glam::DVec3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = DVec3> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(DVec3::from_array)
}

/// Up to 56 random points plus four fixed points spanning a tetrahedron, so
/// the hull is never flat.
fn arb_cloud() -> impl Strategy<Value = PointCloud> {
    prop::collection::vec(arb_point(), 0..=56).prop_map(|mut points| {
        points.extend([
            DVec3::new(-150.0, -150.0, -150.0),
            DVec3::new(150.0, -150.0, -150.0),
            DVec3::new(0.0, 150.0, -150.0),
            DVec3::new(0.0, 0.0, 150.0),
        ]);
        PointCloud::new(points)
    })
}

/// A box sampled on a lattice: corners, points along its edges, points
/// inside its faces and interior points, in shuffled order. Returns the
/// cloud and the eight box corners.
fn arb_lattice_box() -> impl Strategy<Value = (PointCloud, Vec<DVec3>)> {
    let cells = prop::array::uniform3(1usize..=4);
    let steps = prop::array::uniform3(prop::sample::select(vec![0.5, 1.0, 2.5]));
    let offset = arb_point().prop_map(|p| p * 0.5);
    (cells, steps, offset).prop_flat_map(|(cells, steps, offset)| {
        let coord = |axis: usize, i: usize| offset[axis] + i as f64 * steps[axis];
        let mut points = Vec::new();
        for i in 0..=cells[0] {
            for j in 0..=cells[1] {
                for k in 0..=cells[2] {
                    points.push(DVec3::new(coord(0, i), coord(1, j), coord(2, k)));
                }
            }
        }
        let mut corners = Vec::with_capacity(8);
        for i in [0, cells[0]] {
            for j in [0, cells[1]] {
                for k in [0, cells[2]] {
                    corners.push(DVec3::new(coord(0, i), coord(1, j), coord(2, k)));
                }
            }
        }
        (Just(points).prop_shuffle(), Just(corners))
            .prop_map(|(points, corners)| (PointCloud::new(points), corners))
    })
}

/// Random clouds and lattice boxes.
fn arb_any_cloud() -> impl Strategy<Value = PointCloud> {
    prop_oneof![arb_cloud(), arb_lattice_box().prop_map(|(cloud, _)| cloud)]
}

fn keys(points: &[DVec3]) -> HashSet<PointKey> {
    points.iter().map(|p| PointKey::exact(*p)).collect()
}

fn tolerance(cloud: &PointCloud) -> f64 {
    scaled_tolerance(PLANARITY_TOLERANCE, cloud.extent())
}

// =============================================================================
// Hull and faces
// =============================================================================

proptest! {
    /// Every merged face lies in one plane.
    #[test]
    fn proptest_faces_are_planar(cloud in arb_any_cloud()) {
        let result = PointCloudAnalyzer::default().analyze(&cloud).unwrap();
        for face in &result.faces {
            prop_assert!(face.is_flat(), "non-planar face {:?}", face);
        }
    }

    /// Only the eight box corners are outermost, whatever the input order;
    /// lattice points on faces and edges stay inner.
    #[test]
    fn proptest_lattice_box_has_eight_corners((cloud, corners) in arb_lattice_box()) {
        let result = PointCloudAnalyzer::default().analyze(&cloud).unwrap();
        prop_assert_eq!(keys(&result.outermost_points), keys(&corners));
        prop_assert_eq!(result.outermost_points.len(), 8);
        prop_assert_eq!(result.faces.len(), 6);
        prop_assert!(result.faces.iter().all(|f| f.len() == 4));
        prop_assert_eq!(result.inner_points.len(), cloud.len() - 8);
    }

    /// Face vertices, deduplicated, are exactly the hull vertices.
    #[test]
    fn proptest_face_vertices_cover_hull(cloud in arb_any_cloud()) {
        let result = PointCloudAnalyzer::default().analyze(&cloud).unwrap();
        let face_vertices: Vec<DVec3> = result
            .faces
            .iter()
            .flat_map(|f| f.vertices().iter().copied())
            .collect();
        prop_assert_eq!(keys(&face_vertices), keys(&result.outermost_points));
    }

    /// No input point lies outside any face.
    #[test]
    fn proptest_faces_enclose_all_points(cloud in arb_cloud()) {
        let result = PointCloudAnalyzer::default().analyze(&cloud).unwrap();
        let tol = tolerance(&cloud);
        for face in &result.faces {
            let normal = face.normal().unwrap();
            let anchor = face.centroid();
            for p in cloud.iter() {
                prop_assert!(normal.dot(*p - anchor) <= tol);
            }
        }
    }

    /// Inner and outermost points partition the input.
    #[test]
    fn proptest_inner_and_outermost_partition(cloud in arb_any_cloud()) {
        let result = PointCloudAnalyzer::default().analyze(&cloud).unwrap();
        let outer = keys(&result.outermost_points);
        prop_assert!(result.inner_points.iter().all(|p| !outer.contains(&PointKey::exact(*p))));
        prop_assert_eq!(
            result.inner_points.len() + result.outermost_points.len(),
            cloud.len()
        );
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    /// Analyzing the same frame twice gives the same record.
    #[test]
    fn proptest_analysis_is_idempotent(cloud in arb_cloud()) {
        let analyzer = PointCloudAnalyzer::default();
        let first = analyzer.analyze(&cloud).unwrap();
        let second = analyzer.analyze(&cloud).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Parallel and sequential runs agree.
    #[test]
    fn proptest_parallel_matches_sequential(cloud in arb_cloud()) {
        let parallel = PointCloudAnalyzer::default();
        let sequential =
            PointCloudAnalyzer::new(AnalyzerOptions::default().with_parallel(false)).unwrap();
        prop_assert_eq!(parallel.analyze(&cloud).unwrap(), sequential.analyze(&cloud).unwrap());
    }
}

// =============================================================================
// Anomalies
// =============================================================================

proptest! {
    /// Anomalies are a subsequence of the input.
    #[test]
    fn proptest_anomalies_are_input_points(cloud in arb_cloud(), eps in 0.5..40.0f64) {
        let options = AnalyzerOptions::default().with_dbscan(eps, 3);
        let result = PointCloudAnalyzer::new(options).unwrap().analyze(&cloud).unwrap();

        let mut rest = cloud.iter();
        for a in &result.anomaly_points {
            prop_assert!(rest.any(|p| p == a), "{:?} out of order or not an input", a);
        }
    }

    /// With `min_samples = 1` every point is its own core.
    #[test]
    fn proptest_min_samples_one_has_no_anomalies(cloud in arb_cloud()) {
        let options = AnalyzerOptions::default().with_dbscan(1.0, 1);
        let result = PointCloudAnalyzer::new(options).unwrap().analyze(&cloud).unwrap();
        prop_assert!(result.anomaly_points.is_empty());
    }
}

// =============================================================================
// Degenerate input
// =============================================================================

proptest! {
    /// Fewer than four points never produce a partial result.
    #[test]
    fn proptest_too_few_points_is_degenerate(points in prop::collection::vec(arb_point(), 0..4)) {
        let err = PointCloudAnalyzer::default()
            .analyze(&PointCloud::new(points))
            .unwrap_err();
        prop_assert!(err.is_degenerate());
    }
}
