//! # Cloud Faces
//!
//! Turns the triangulated surface of a convex hull into its true faces:
//! coplanar, edge-adjacent triangles are merged and each merged group is
//! ordered into a simple polygon.
//!
//! ## Architecture
//!
//! ```text
//! Triangle facets → FaceMerger (DisjointSet) → PolygonOrderer → Polygon
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cloud_faces::merge_faces;
//! use cloud_geometry::{ConvexHull, PointCloud};
//!
//! let cloud = PointCloud::from(vec![
//!     [0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 3.0], [2.0, 0.0, 3.0], [2.0, 1.0, 3.0], [0.0, 1.0, 3.0],
//! ]);
//! let hull = ConvexHull::compute(&cloud)?;
//! let faces = merge_faces(hull.facets())?;
//! assert_eq!(faces.len(), 6);
//! # Ok::<(), cloud_geometry::GeometryError>(())
//! ```

pub mod disjoint_set;
pub mod merge;
pub mod order;
pub mod polygon;

mod predicates;

pub use disjoint_set::DisjointSet;
pub use merge::{merge_faces, FaceMerger, NormalGrouping};
pub use order::{OrderingMethod, PolygonOrderer};
pub use polygon::Polygon;
