//! Skin condition classifier.
//!
//! The orchestrating predictor: it loads the pretrained artifact set,
//! extracts features from the input image, scales them, runs the classifier,
//! and maps probabilities to class names. Every failure anywhere in that
//! sequence is caught at the boundary and returned as a structured report;
//! nothing escapes to the caller.

use crate::artifacts::{ArtifactPaths, ArtifactSet};
use crate::core::config::{ConfigError, ConfigValidator};
use crate::core::{ClassifyError, ClassifyResult, Classifier, ConfigValidatorExt, Scaler};
use crate::features::{FeatureExtractor, FeatureExtractorConfig};
use crate::predictor::report::{Prediction, PredictionReport};
use ndarray::Axis;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for the skin condition classifier.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SkinConditionClassifierConfig {
    /// Feature-extraction parameters.
    pub extractor: FeatureExtractorConfig,
}

impl ConfigValidator for SkinConditionClassifierConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.extractor.validate()
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Classifies the skin condition visible in an image.
///
/// Holds the extraction recipe and the artifact locations; the artifacts
/// themselves are re-read from disk on every call, so a changed file is
/// always picked up. Each call is independent and stateless.
#[derive(Debug)]
pub struct SkinConditionClassifier {
    /// Feature extractor applying the fixed recipe.
    extractor: FeatureExtractor,
    /// Locations of the pretrained artifacts.
    artifacts: ArtifactPaths,
}

impl SkinConditionClassifier {
    /// Creates a classifier from a validated configuration and artifact
    /// locations.
    pub fn new(
        config: SkinConditionClassifierConfig,
        artifacts: ArtifactPaths,
    ) -> ClassifyResult<Self> {
        let config = config.validate_and_wrap()?;
        Ok(Self {
            extractor: FeatureExtractor::new(config.extractor)?,
            artifacts,
        })
    }

    /// Creates a builder for the classifier.
    pub fn builder() -> SkinConditionClassifierBuilder {
        SkinConditionClassifierBuilder::new()
    }

    /// Predicts the skin condition for one image.
    ///
    /// Always returns a structured report: the success form with the
    /// predicted label and the full confidence map, or the failure form with
    /// a single message. This method never returns an error and never
    /// panics on bad input.
    pub fn predict(&self, image_path: &Path) -> PredictionReport {
        match self.run_pipeline(image_path) {
            Ok(prediction) => prediction.into(),
            Err(error) => {
                tracing::error!("prediction failed for {}: {}", image_path.display(), error);
                PredictionReport::failure(error.to_string())
            }
        }
    }

    fn run_pipeline(&self, image_path: &Path) -> ClassifyResult<Prediction> {
        let artifacts = ArtifactSet::load(&self.artifacts)?;

        let features = self
            .extractor
            .extract(image_path)
            .ok_or(ClassifyError::NoFeatures)?;

        // The scaler contract is batch-oriented; wrap the vector as a
        // single-row batch.
        let batch = features.insert_axis(Axis(0));
        let scaled = artifacts.scaler.transform(batch.view())?;

        let predicted = artifacts.classifier.predict(scaled.view())?;
        let class_index = *predicted.first().ok_or_else(|| {
            ClassifyError::invalid_input("classifier returned no prediction for the batch")
        })?;

        let probabilities = artifacts.classifier.predict_proba(scaled.view())?;
        let row = probabilities.row(0);

        // The loader already enforces this; a mismatch here means the
        // classifier broke its own contract, and it fails loudly rather
        // than truncating the confidence map.
        if row.len() != artifacts.mapping.len() {
            return Err(ClassifyError::invalid_input(format!(
                "probability row has {} entries but the class mapping names {}",
                row.len(),
                artifacts.mapping.len()
            )));
        }

        let label = artifacts
            .mapping
            .label(class_index)
            .ok_or_else(|| {
                ClassifyError::invalid_input(format!(
                    "predicted class index {} is outside the mapping",
                    class_index
                ))
            })?
            .to_string();

        let confidence_scores: BTreeMap<String, f32> = artifacts
            .mapping
            .classes
            .iter()
            .cloned()
            .zip(row.iter().copied())
            .collect();

        Ok(Prediction {
            label,
            confidence_scores,
        })
    }
}

/// One-shot prediction with explicit artifact paths.
///
/// Convenience wrapper matching the shape of the CLI: build a classifier
/// with the default extraction recipe, run one prediction, and return the
/// structured report.
pub fn predict_condition(
    image_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    mapping_path: &Path,
) -> PredictionReport {
    let artifacts = ArtifactPaths::new(model_path, scaler_path, mapping_path);
    match SkinConditionClassifier::new(SkinConditionClassifierConfig::default(), artifacts) {
        Ok(classifier) => classifier.predict(image_path),
        Err(error) => PredictionReport::failure(error.to_string()),
    }
}

/// Builder for the skin condition classifier.
pub struct SkinConditionClassifierBuilder {
    config: SkinConditionClassifierConfig,
    model_path: Option<PathBuf>,
    scaler_path: Option<PathBuf>,
    mapping_path: Option<PathBuf>,
}

impl SkinConditionClassifierBuilder {
    /// Creates a builder with default configuration and no artifact paths.
    pub fn new() -> Self {
        Self {
            config: SkinConditionClassifierConfig::default(),
            model_path: None,
            scaler_path: None,
            mapping_path: None,
        }
    }

    /// Sets the resize target applied before feature extraction.
    pub fn input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.config.extractor.input_shape = Some(input_shape);
        self
    }

    /// Sets the edge-detector thresholds.
    pub fn canny_thresholds(mut self, low: f32, high: f32) -> Self {
        self.config.extractor.canny_low = Some(low);
        self.config.extractor.canny_high = Some(high);
        self
    }

    /// Sets the path of the serialized classifier.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Sets the path of the serialized feature scaler.
    pub fn scaler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler_path = Some(path.into());
        self
    }

    /// Sets the path of the class-mapping document.
    pub fn mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = Some(path.into());
        self
    }

    /// Builds the classifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any artifact path is unset or the
    /// extraction configuration is invalid. Artifact files are not read
    /// here; they are loaded fresh on every prediction.
    pub fn build(self) -> ClassifyResult<SkinConditionClassifier> {
        let model_path = self
            .model_path
            .ok_or_else(|| ClassifyError::config_error("model path is not set"))?;
        let scaler_path = self
            .scaler_path
            .ok_or_else(|| ClassifyError::config_error("scaler path is not set"))?;
        let mapping_path = self
            .mapping_path
            .ok_or_else(|| ClassifyError::config_error("mapping path is not set"))?;

        SkinConditionClassifier::new(
            self.config,
            ArtifactPaths::new(model_path, scaler_path, mapping_path),
        )
    }
}

impl Default for SkinConditionClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
