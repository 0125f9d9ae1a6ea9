//! # Cloud Geometry
//!
//! Point cloud types, quantization and 3D convex hull for the point cloud
//! analysis pipeline.
//!
//! ## Architecture
//!
//! ```text
//! PointCloud → ConvexHull (QuickHull) → Triangle facets → cloud-faces
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cloud_geometry::{ConvexHull, PointCloud};
//!
//! let cloud = PointCloud::from(vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ]);
//! let hull = ConvexHull::compute(&cloud)?;
//! assert_eq!(hull.facet_count(), 4);
//! # Ok::<(), cloud_geometry::GeometryError>(())
//! ```

pub mod error;
pub mod hull;
pub mod point;
pub mod quantize;

pub use error::{GeometryError, GeometryResult};
pub use hull::{convex_hull, ConvexHull, ConvexHullBuilder};
pub use point::{Point3, PointCloud, Triangle};
pub use quantize::{quantize, PointKey, Quantize, Quantizer};

pub use glam::DVec3;
