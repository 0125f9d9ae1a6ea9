//! # Anomaly Errors

use thiserror::Error;

/// Errors raised when configuring anomaly detection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnomalyError {
    /// A clustering parameter is out of range.
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },
}

impl AnomalyError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result alias for anomaly detection.
pub type AnomalyResult<T> = Result<T, AnomalyError>;
