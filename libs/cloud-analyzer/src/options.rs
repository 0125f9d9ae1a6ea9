//! # Analyzer Options
//!
//! Runtime knobs of [`crate::PointCloudAnalyzer`]. Defaults come from
//! `config::constants`; every field may be omitted when deserializing.

use cloud_anomaly::Dbscan;
use cloud_faces::{NormalGrouping, OrderingMethod};
use config::constants::{DEFAULT_EPS, DEFAULT_MIN_SAMPLES, MAX_QUANTIZE_DIGITS, QUANTIZE_DIGITS};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Options for a [`crate::PointCloudAnalyzer`].
///
/// # Example
///
/// ```rust
/// use cloud_analyzer::AnalyzerOptions;
///
/// let options = AnalyzerOptions::from_json(r#"{ "eps": 0.25 }"#).unwrap();
/// assert_eq!(options.eps, 0.25);
/// assert_eq!(options.min_samples, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// DBSCAN neighborhood radius.
    pub eps: f64,
    /// DBSCAN core threshold, the point itself included.
    pub min_samples: usize,
    /// Decimal places kept when comparing normals and vertices.
    pub quantize_digits: u32,
    /// Vertex ordering of merged faces.
    pub ordering: OrderingMethod,
    /// Whether opposite normals are one face class.
    pub normal_grouping: NormalGrouping,
    /// Run the hull and anomaly stages (and batch frames) on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
            quantize_digits: QUANTIZE_DIGITS,
            ordering: OrderingMethod::default(),
            normal_grouping: NormalGrouping::default(),
            parallel: true,
        }
    }
}

impl AnalyzerOptions {
    /// Sets the DBSCAN parameters.
    pub fn with_dbscan(mut self, eps: f64, min_samples: usize) -> Self {
        self.eps = eps;
        self.min_samples = min_samples;
        self
    }

    /// Sets the quantization digit count.
    pub fn with_quantize_digits(mut self, digits: u32) -> Self {
        self.quantize_digits = digits;
        self
    }

    /// Sets the face ordering method.
    pub fn with_ordering(mut self, ordering: OrderingMethod) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the normal grouping mode.
    pub fn with_normal_grouping(mut self, grouping: NormalGrouping) -> Self {
        self.normal_grouping = grouping;
        self
    }

    /// Enables or disables rayon parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Anomaly`] for a bad `eps` or `min_samples`
    /// - [`AnalysisError::InvalidOptions`] if `quantize_digits` exceeds
    ///   [`MAX_QUANTIZE_DIGITS`]
    pub fn validate(&self) -> Result<(), AnalysisError> {
        Dbscan::new(self.eps, self.min_samples)?;
        if self.quantize_digits > MAX_QUANTIZE_DIGITS {
            return Err(AnalysisError::invalid_options(format!(
                "quantize_digits must be at most {MAX_QUANTIZE_DIGITS}, got {}",
                self.quantize_digits
            )));
        }
        Ok(())
    }

    /// Parses and validates options from JSON. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Json`] for malformed JSON, otherwise as
    /// [`AnalyzerOptions::validate`].
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
