//! # Cloud Anomaly
//!
//! Flags density outliers in a point cloud with DBSCAN. A point is an
//! anomaly when no cluster reaches it.
//!
//! ## Usage
//!
//! ```rust
//! use cloud_anomaly::detect_anomalies;
//! use glam::DVec3;
//!
//! let points = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(0.5, 0.0, 0.0),
//!     DVec3::new(0.5, 0.5, 0.0),
//!     DVec3::new(20.0, 0.0, 0.0),
//! ];
//! let anomalies = detect_anomalies(&points, 1.0, 2)?;
//! assert_eq!(anomalies, vec![DVec3::new(20.0, 0.0, 0.0)]);
//! # Ok::<(), cloud_anomaly::AnomalyError>(())
//! ```

pub mod dbscan;
pub mod error;
pub mod grid;

pub use dbscan::{detect_anomalies, ClusterLabel, Dbscan};
pub use error::{AnomalyError, AnomalyResult};
pub use grid::NeighborGrid;
