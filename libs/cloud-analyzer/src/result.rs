//! # Analysis Result
//!
//! Per-frame output record. Serializes as an object of point lists, each
//! point an `[x, y, z]` array and each face a list of points.

use cloud_faces::Polygon;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Everything computed for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Input points, unchanged and in order.
    pub all_points: Vec<DVec3>,
    /// Input points that are not hull vertices, in input order.
    pub inner_points: Vec<DVec3>,
    /// Hull vertices, in input order.
    pub outermost_points: Vec<DVec3>,
    /// DBSCAN noise points, in input order.
    pub anomaly_points: Vec<DVec3>,
    /// Merged planar hull faces, each an ordered boundary loop.
    pub faces: Vec<Polygon>,
}

impl AnalysisResult {
    /// Number of merged faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total surface area of the hull.
    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(Polygon::area).sum()
    }

    /// Serializes the record as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a record produced by [`AnalysisResult::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Serializes a batch of frame records as a JSON array.
pub fn results_to_json(results: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string(results)
}
