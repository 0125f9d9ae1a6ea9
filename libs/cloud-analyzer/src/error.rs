//! # Analysis Errors
//!
//! Top-level error for the analyzer. Wraps the errors of the stage crates so
//! callers match on one type.

use cloud_anomaly::AnomalyError;
use cloud_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while analyzing a point cloud.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Hull or face construction failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Anomaly detection parameters are out of range.
    #[error(transparent)]
    Anomaly(#[from] AnomalyError),

    /// Analyzer options are out of range.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Options or results could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A frame of a batch failed.
    #[error("Frame {index}: {source}")]
    Frame {
        index: usize,
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Wraps `self` with the index of the frame it came from.
    pub fn in_frame(self, index: usize) -> Self {
        Self::Frame {
            index,
            source: Box::new(self),
        }
    }

    /// Returns true if the input has no 3D hull (too few points, collinear
    /// or coplanar), looking through frame wrappers.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Geometry(e) => e.is_degenerate(),
            Self::Frame { source, .. } => source.is_degenerate(),
            _ => false,
        }
    }

    /// Index of the failing frame for batch errors.
    pub fn frame_index(&self) -> Option<usize> {
        match self {
            Self::Frame { index, .. } => Some(*index),
            _ => None,
        }
    }
}
