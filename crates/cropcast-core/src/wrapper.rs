//! The model wrapper: both loaded artifacts plus single-row inference.

use crate::artifact::{EncoderArtifact, PipelineArtifact};
use crate::{FeatureRecord, ModelError, Prediction};
use std::path::Path;

/// Holds the fitted pipeline and label encoder, set at construction and
/// never reassigned. One instance serves all requests; inference is
/// read-only, so the wrapper is freely shareable across tasks.
#[derive(Debug, Clone)]
pub struct ModelWrapper {
    pipeline: PipelineArtifact,
    encoder: EncoderArtifact,
}

impl ModelWrapper {
    /// Builds a wrapper from already-loaded artifacts.
    ///
    /// Cross-validates the pair: the encoder must carry exactly two
    /// classes, matching the pipeline's binary probability output.
    pub fn new(
        pipeline: PipelineArtifact,
        encoder: EncoderArtifact,
    ) -> Result<Self, ModelError> {
        if encoder.classes.len() != 2 {
            return Err(ModelError::Shape(format!(
                "encoder has {} classes, binary pipeline expects 2",
                encoder.classes.len()
            )));
        }
        Ok(Self { pipeline, encoder })
    }

    /// Loads both artifacts from disk and builds the wrapper.
    ///
    /// This is the startup path; it runs exactly once per process and a
    /// failure here must abort the service before it accepts traffic.
    pub fn from_paths(
        model_path: impl AsRef<Path>,
        encoder_path: impl AsRef<Path>,
    ) -> Result<Self, ModelError> {
        let pipeline = PipelineArtifact::load(model_path)?;
        let encoder = EncoderArtifact::load(encoder_path)?;
        Self::new(pipeline, encoder)
    }

    /// The labels the encoder can produce.
    pub fn classes(&self) -> &[String] {
        &self.encoder.classes
    }

    /// Runs inference on one feature record.
    ///
    /// Orders the record by the pipeline's column contract, predicts the
    /// class index and both probabilities, and decodes the index to its
    /// label. Every failure keeps its structured cause; callers decide
    /// what, if anything, the client gets to see.
    pub fn predict_one(&self, features: &FeatureRecord) -> Result<Prediction, ModelError> {
        let row = features.to_row(&self.pipeline.feature_names)?;
        let index = self.pipeline.predict(&row)?;
        let [proba_0, proba_1] = self.pipeline.predict_proba(&row)?;
        let label = self.encoder.inverse_transform(index)?;

        Ok(Prediction {
            prediction: label.to_string(),
            proba_0,
            proba_1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ScalerStage;
    use crate::FEATURE_NAMES;

    fn pipeline() -> PipelineArtifact {
        PipelineArtifact {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            scaler: ScalerStage {
                mean: vec![50.0, 50.0, 50.0, 25.0, 70.0, 6.5, 100.0],
                scale: vec![10.0, 10.0, 10.0, 5.0, 15.0, 1.0, 50.0],
            },
            coefficients: vec![0.8, -0.3, 0.1, 0.5, -0.2, 0.4, 0.6],
            intercept: -0.1,
        }
    }

    fn encoder() -> EncoderArtifact {
        EncoderArtifact {
            classes: vec!["rice".to_string(), "maize".to_string()],
        }
    }

    fn sample() -> FeatureRecord {
        FeatureRecord {
            n: 90.0,
            p: 42.0,
            k: 43.0,
            temperature: 20.87,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        }
    }

    #[test]
    fn test_predict_one_probabilities_sum_to_one() {
        let wrapper = ModelWrapper::new(pipeline(), encoder()).unwrap();
        let result = wrapper.predict_one(&sample()).unwrap();
        assert!((0.0..=1.0).contains(&result.proba_0));
        assert!((0.0..=1.0).contains(&result.proba_1));
        assert!((result.proba_0 + result.proba_1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_one_label_is_known_to_encoder() {
        let wrapper = ModelWrapper::new(pipeline(), encoder()).unwrap();
        let result = wrapper.predict_one(&sample()).unwrap();
        assert!(wrapper.classes().contains(&result.prediction));
    }

    #[test]
    fn test_predict_one_label_matches_dominant_class() {
        let wrapper = ModelWrapper::new(pipeline(), encoder()).unwrap();
        let result = wrapper.predict_one(&sample()).unwrap();
        let expected = if result.proba_1 >= result.proba_0 {
            "maize"
        } else {
            "rice"
        };
        assert_eq!(result.prediction, expected);
    }

    #[test]
    fn test_predict_one_is_column_order_independent() {
        // Same fitted parameters, shuffled column order: the explicit
        // feature_names contract must yield identical predictions.
        let mut shuffled = pipeline();
        shuffled.feature_names.rotate_left(3);
        shuffled.scaler.mean.rotate_left(3);
        shuffled.scaler.scale.rotate_left(3);
        shuffled.coefficients.rotate_left(3);

        let a = ModelWrapper::new(pipeline(), encoder())
            .unwrap()
            .predict_one(&sample())
            .unwrap();
        let b = ModelWrapper::new(shuffled, encoder())
            .unwrap()
            .predict_one(&sample())
            .unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert!((a.proba_1 - b.proba_1).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_non_binary_encoder() {
        let one_class = EncoderArtifact {
            classes: vec!["rice".to_string()],
        };
        let err = ModelWrapper::new(pipeline(), one_class).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn test_predict_one_surfaces_unknown_feature() {
        let mut bad = pipeline();
        bad.feature_names[2] = "magnesium".to_string();
        let wrapper = ModelWrapper::new(bad, encoder()).unwrap();
        let err = wrapper.predict_one(&sample()).unwrap_err();
        assert!(matches!(err, ModelError::UnknownFeature(_)));
    }

    #[test]
    fn test_from_paths_fails_on_missing_files() {
        let err = ModelWrapper::from_paths("/nonexistent/model.json", "/nonexistent/encoder.json")
            .unwrap_err();
        assert!(matches!(err, ModelError::ModelLoad(_)));
    }
}
