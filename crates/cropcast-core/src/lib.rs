//! Core domain types and model handling for cropcast.
//!
//! This crate provides everything the HTTP layer needs to serve
//! predictions:
//!
//! - [`FeatureRecord`] — the seven-field soil/climate sample to classify
//! - [`Prediction`] — predicted label plus the two class probabilities
//! - [`PipelineArtifact`] and [`EncoderArtifact`] — the serialized model
//!   objects loaded once at startup
//! - [`ModelWrapper`] — holds both artifacts and runs single-row inference
//! - [`ModelError`] — error type for loading and prediction
//!
//! # Example
//!
//! ```rust
//! use cropcast_core::FeatureRecord;
//!
//! let sample = FeatureRecord {
//!     n: 90.0,
//!     p: 42.0,
//!     k: 43.0,
//!     temperature: 20.87,
//!     humidity: 82.0,
//!     ph: 6.5,
//!     rainfall: 202.9,
//! };
//! assert_eq!(sample.value("rainfall"), Some(202.9));
//! ```

pub mod artifact;
pub mod wrapper;

pub use artifact::{EncoderArtifact, PipelineArtifact, ScalerStage};
pub use wrapper::ModelWrapper;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The feature columns the model was fitted on, in schema order.
///
/// Artifact loading validates that a pipeline artifact names exactly this
/// set of columns (its own order decides the row layout at inference time).
pub const FEATURE_NAMES: [&str; 7] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Errors from artifact loading or prediction.
///
/// Loading variants name which artifact failed so startup logs can point
/// at the offending file. Prediction variants keep the structured cause
/// for server-side logging; the HTTP layer decides what the client sees.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The pipeline artifact could not be read or deserialized.
    #[error("Error loading the model: {0}")]
    ModelLoad(String),

    /// The label encoder artifact could not be read or deserialized.
    #[error("Error loading the encoder: {0}")]
    EncoderLoad(String),

    /// A loaded artifact is internally inconsistent.
    #[error("Artifact shape mismatch: {0}")]
    Shape(String),

    /// The pipeline expects a feature column the record does not carry.
    #[error("Unknown feature column: {0}")]
    UnknownFeature(String),

    /// The predicted class index has no label in the encoder.
    #[error("Predicted class index {0} has no label")]
    UnknownClass(usize),
}

/// One sample of soil and climate measurements.
///
/// `N`, `P` and `K` are macronutrient levels; `ph` is soil acidity.
/// All seven fields are required on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureRecord {
    /// Looks up a field by its schema column name.
    pub fn value(&self, name: &str) -> Option<f64> {
        match name {
            "N" => Some(self.n),
            "P" => Some(self.p),
            "K" => Some(self.k),
            "temperature" => Some(self.temperature),
            "humidity" => Some(self.humidity),
            "ph" => Some(self.ph),
            "rainfall" => Some(self.rainfall),
            _ => None,
        }
    }

    /// Builds the single inference row in the given column order.
    pub fn to_row(&self, columns: &[String]) -> Result<Vec<f64>, ModelError> {
        columns
            .iter()
            .map(|name| {
                self.value(name)
                    .ok_or_else(|| ModelError::UnknownFeature(name.clone()))
            })
            .collect()
    }
}

/// The outcome of one prediction: a label and both class probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Human-readable label decoded through the label encoder.
    pub prediction: String,
    /// Probability of class 0.
    pub proba_0: f64,
    /// Probability of class 1.
    pub proba_1: f64,
}
