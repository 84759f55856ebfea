//! Serialized model artifacts and their loaders.
//!
//! Two files are produced offline by the training job and loaded here
//! exactly once at startup: the fitted pipeline (scaler + logistic
//! regression) and the label encoder. Both are plain JSON. Loading
//! validates shape eagerly so a bad artifact fails the process before it
//! accepts traffic, with an error naming which file is at fault.

use crate::{ModelError, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Standard-scaler stage of the pipeline: per-column mean and scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerStage {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// The fitted prediction pipeline.
///
/// `feature_names` is the explicit column-order contract: inference rows
/// are laid out in this order, and `mean`, `scale` and `coefficients`
/// are indexed by it. This is a binary classifier; the probability output
/// always has exactly two entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub feature_names: Vec<String>,
    pub scaler: ScalerStage,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl PipelineArtifact {
    /// Loads and validates the pipeline artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ModelError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let artifact: Self = serde_json::from_str(&raw)
            .map_err(|e| ModelError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Checks internal consistency: column membership and vector lengths.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();
        if n != FEATURE_NAMES.len() {
            return Err(ModelError::Shape(format!(
                "pipeline names {} feature columns, expected {}",
                n,
                FEATURE_NAMES.len()
            )));
        }
        // Matching length plus one occurrence of every expected name
        // makes feature_names a permutation of the schema columns.
        for expected in FEATURE_NAMES {
            let count = self.feature_names.iter().filter(|n| n == &expected).count();
            if count != 1 {
                return Err(ModelError::Shape(format!(
                    "pipeline names column '{}' {} times, expected once",
                    expected, count
                )));
            }
        }
        for (label, len) in [
            ("scaler mean", self.scaler.mean.len()),
            ("scaler scale", self.scaler.scale.len()),
            ("coefficients", self.coefficients.len()),
        ] {
            if len != n {
                return Err(ModelError::Shape(format!(
                    "{} has {} entries, expected {}",
                    label, len, n
                )));
            }
        }
        if self.scaler.scale.iter().any(|s| *s == 0.0) {
            return Err(ModelError::Shape("scaler scale contains zero".into()));
        }
        Ok(())
    }

    /// Probability vector over the two classes for one row.
    ///
    /// The row must already be in `feature_names` order.
    pub fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        if row.len() != self.feature_names.len() {
            return Err(ModelError::Shape(format!(
                "row has {} values, pipeline expects {}",
                row.len(),
                self.feature_names.len()
            )));
        }
        let z: f64 = row
            .iter()
            .zip(&self.scaler.mean)
            .zip(&self.scaler.scale)
            .zip(&self.coefficients)
            .map(|(((x, mean), scale), coef)| coef * ((x - mean) / scale))
            .sum::<f64>()
            + self.intercept;
        let p1 = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - p1, p1])
    }

    /// Raw predicted class index for one row.
    pub fn predict(&self, row: &[f64]) -> Result<usize, ModelError> {
        let proba = self.predict_proba(row)?;
        Ok(usize::from(proba[1] >= proba[0]))
    }
}

/// The fitted label encoder: class index to human-readable label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

impl EncoderArtifact {
    /// Loads the encoder artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ModelError::EncoderLoad(format!("{}: {}", path.display(), e)))?;
        let artifact: Self = serde_json::from_str(&raw)
            .map_err(|e| ModelError::EncoderLoad(format!("{}: {}", path.display(), e)))?;
        Ok(artifact)
    }

    /// Maps a raw class index back to its label.
    pub fn inverse_transform(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass(index))
    }
}
