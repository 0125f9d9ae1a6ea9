//! # Point Cloud Analyzer
//!
//! Runs the full analysis of one frame:
//!
//! ```text
//! PointCloud ─┬─► ConvexHullBuilder ─► FaceMerger ─► faces, outermost, inner
//!             └─► Dbscan ─────────────────────────► anomalies
//! ```
//!
//! The two branches share nothing and run under `rayon::join`. Batches of
//! frames run on rayon's pool as well; results keep the caller's frame
//! order.

use std::collections::HashSet;

use cloud_anomaly::Dbscan;
use cloud_faces::{FaceMerger, Polygon};
use cloud_geometry::{ConvexHull, ConvexHullBuilder, GeometryError, PointCloud, PointKey};
use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::AnalysisError;
use crate::options::AnalyzerOptions;
use crate::result::AnalysisResult;

/// Analyzes point cloud frames.
///
/// Options are validated once at construction; analysis itself only fails
/// on bad input.
///
/// # Example
///
/// ```rust
/// use cloud_analyzer::{AnalyzerOptions, PointCloudAnalyzer};
/// use cloud_geometry::PointCloud;
///
/// let cloud = PointCloud::from(vec![
///     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0],
///     [0.2, 0.2, 0.2],
/// ]);
/// let analyzer = PointCloudAnalyzer::new(AnalyzerOptions::default())?;
/// let result = analyzer.analyze(&cloud)?;
/// assert_eq!(result.outermost_points.len(), 4);
/// assert_eq!(result.inner_points.len(), 1);
/// assert_eq!(result.faces.len(), 4);
/// # Ok::<(), cloud_analyzer::AnalysisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PointCloudAnalyzer {
    options: AnalyzerOptions,
    hull: ConvexHullBuilder,
    merger: FaceMerger,
    dbscan: Dbscan,
}

impl Default for PointCloudAnalyzer {
    fn default() -> Self {
        let options = AnalyzerOptions::default();
        Self {
            options,
            hull: ConvexHullBuilder::default(),
            merger: face_merger(&options),
            dbscan: Dbscan::default(),
        }
    }
}

impl PointCloudAnalyzer {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// As [`AnalyzerOptions::validate`].
    pub fn new(options: AnalyzerOptions) -> Result<Self, AnalysisError> {
        options.validate()?;
        Ok(Self {
            options,
            hull: ConvexHullBuilder::default(),
            merger: face_merger(&options),
            dbscan: Dbscan::new(options.eps, options.min_samples)?,
        })
    }

    /// Options in use.
    #[inline]
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyzes one frame.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::NonFiniteCoordinate`] for NaN or infinite input
    /// - [`GeometryError::DegenerateGeometry`] for fewer than four distinct
    ///   points or collinear/coplanar input
    #[instrument(skip_all, fields(points = cloud.len()))]
    pub fn analyze(&self, cloud: &PointCloud) -> Result<AnalysisResult, AnalysisError> {
        cloud.validate()?;

        let (shape, anomaly_points) = if self.options.parallel {
            rayon::join(
                || self.shape(cloud),
                || self.dbscan.anomalies(cloud.points()),
            )
        } else {
            (self.shape(cloud), self.dbscan.anomalies(cloud.points()))
        };
        let (hull, faces) = shape?;

        let outermost_points = hull.vertex_points().to_vec();
        let inner_points = inner_points(cloud.points(), &outermost_points);

        debug!(
            hull_vertices = outermost_points.len(),
            hull_triangles = hull.facet_count(),
            faces = faces.len(),
            inner = inner_points.len(),
            anomalies = anomaly_points.len(),
            "Frame analyzed"
        );

        Ok(AnalysisResult {
            all_points: cloud.points().to_vec(),
            inner_points,
            outermost_points,
            anomaly_points,
            faces,
        })
    }

    /// Analyzes every frame, one result per frame in input order. A failing
    /// frame does not stop the others.
    pub fn analyze_frames(
        &self,
        frames: &[PointCloud],
    ) -> Vec<Result<AnalysisResult, AnalysisError>> {
        if self.options.parallel {
            frames.par_iter().map(|frame| self.analyze(frame)).collect()
        } else {
            frames.iter().map(|frame| self.analyze(frame)).collect()
        }
    }

    /// Analyzes every frame and fails if any frame fails.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Frame`] carrying the lowest failing frame index.
    pub fn analyze_sequence(
        &self,
        frames: &[PointCloud],
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        let results = self
            .analyze_frames(frames)
            .into_iter()
            .enumerate()
            .map(|(index, result)| result.map_err(|e| e.in_frame(index)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(frames = results.len(), "Sequence analyzed");
        Ok(results)
    }

    fn shape(&self, cloud: &PointCloud) -> Result<(ConvexHull, Vec<Polygon>), GeometryError> {
        let hull = self.hull.build(cloud)?;
        let faces = self.merger.merge(hull.facets())?;
        Ok((hull, faces))
    }
}

/// Analyzes one frame with default options.
///
/// # Errors
///
/// As [`PointCloudAnalyzer::analyze`].
pub fn analyze(cloud: &PointCloud) -> Result<AnalysisResult, AnalysisError> {
    PointCloudAnalyzer::default().analyze(cloud)
}

fn face_merger(options: &AnalyzerOptions) -> FaceMerger {
    FaceMerger::new()
        .with_digits(options.quantize_digits)
        .with_grouping(options.normal_grouping)
        .with_ordering(options.ordering)
}

/// Points of `all` whose coordinates match no hull vertex, in order.
/// Duplicates of a hull vertex are removed too.
fn inner_points(all: &[DVec3], hull_vertices: &[DVec3]) -> Vec<DVec3> {
    let hull: HashSet<PointKey> = hull_vertices.iter().map(|p| PointKey::exact(*p)).collect();
    all.iter()
        .copied()
        .filter(|p| !hull.contains(&PointKey::exact(*p)))
        .collect()
}
