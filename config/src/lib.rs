//! # Config Crate
//!
//! Centralized configuration constants for the point cloud analysis pipeline.
//! All magic numbers and tunable defaults are defined here so the hull,
//! face merging and anomaly detection crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_EPS, DEFAULT_MIN_SAMPLES, QUANTIZE_DIGITS};
//!
//! // Quantization keeps 12 decimal places unless overridden
//! assert_eq!(QUANTIZE_DIGITS, 12);
//!
//! // Clustering defaults
//! let eps: Option<f64> = None;
//! assert_eq!(eps.unwrap_or(DEFAULT_EPS), 1.0);
//! assert_eq!(DEFAULT_MIN_SAMPLES, 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Pure Values**: No platform-specific values, no I/O
//! - **Documented**: Every constant states where it is used

pub mod constants;
