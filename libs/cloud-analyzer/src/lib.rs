//! # Cloud Analyzer
//!
//! Geometric analysis of 3D point cloud frames. For each frame it finds:
//!
//! - the convex hull vertices (`outermost_points`) and the rest
//!   (`inner_points`)
//! - the hull's planar faces, merged from its triangles
//! - density outliers (`anomaly_points`) found by DBSCAN
//!
//! ## Usage
//!
//! ```rust
//! use cloud_analyzer::analyze;
//! use cloud_geometry::PointCloud;
//!
//! let cube = PointCloud::from(vec![
//!     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
//! ]);
//! let result = analyze(&cube)?;
//! assert_eq!(result.faces.len(), 6);
//! assert!(result.inner_points.is_empty());
//! # Ok::<(), cloud_analyzer::AnalysisError>(())
//! ```

pub mod analyzer;
pub mod error;
pub mod options;
pub mod result;

pub use analyzer::{analyze, PointCloudAnalyzer};
pub use error::AnalysisError;
pub use options::AnalyzerOptions;
pub use result::{results_to_json, AnalysisResult};

pub use cloud_anomaly::ClusterLabel;
pub use cloud_faces::{NormalGrouping, OrderingMethod, Polygon};
pub use cloud_geometry::PointCloud;
