//! # Geometry Errors
//!
//! Error types for point cloud construction and hull computation.

use thiserror::Error;

/// Errors that can occur while building geometry from a point cloud.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// No 3D hull exists for the input (too few points, collinear, coplanar).
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate in point {index}")]
    NonFiniteCoordinate { index: usize },

    /// Malformed input that is not a point cloud at all
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl GeometryError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns true for [`GeometryError::DegenerateGeometry`].
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}

/// Result alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
