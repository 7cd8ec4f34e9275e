//! Error types for the classification pipeline.
//!
//! This module defines the error types that can occur while extracting
//! features, loading pretrained artifacts, and running inference, along with
//! utility constructors for creating them with appropriate context.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Enum representing different stages of processing in the pipeline.
///
/// This enum is used to identify which stage of the pipeline an error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while computing image features.
    FeatureExtraction,
    /// Error occurred while applying the feature scaler.
    Scaling,
    /// Error occurred while running the classifier.
    Inference,
    /// Error occurred while mapping model output to class names.
    PostProcessing,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::FeatureExtraction => write!(f, "feature extraction"),
            ProcessingStage::Scaling => write!(f, "scaling"),
            ProcessingStage::Inference => write!(f, "inference"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the classification pipeline.
///
/// Covers image loading, feature extraction, pretrained artifact loading,
/// and inference failures. The predictor converts every variant into a
/// structured result at its boundary; none of them escape to the caller.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// The feature extractor could not derive a vector from the input image.
    #[error("Could not extract features from image")]
    NoFeatures,

    /// One or more required artifact files are missing on disk.
    #[error("Model files not found. Checked: {checked}")]
    ArtifactsMissing {
        /// The paths that were checked, comma separated.
        checked: String,
    },

    /// An artifact file exists but could not be deserialized.
    #[error("malformed artifact {path}")]
    ArtifactParse {
        /// The path of the artifact that failed to parse.
        path: PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a ClassifyError for a set of missing artifact files.
    ///
    /// The resulting message names exactly the paths that were checked,
    /// in the order they were given.
    pub fn artifacts_missing(checked: &[&Path]) -> Self {
        let checked = checked
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::ArtifactsMissing { checked }
    }

    /// Creates a ClassifyError for an artifact that failed to deserialize.
    pub fn artifact_parse(path: &Path, source: serde_json::Error) -> Self {
        Self::ArtifactParse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a ClassifyError for scaling operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn scaling_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Scaling,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a ClassifyError for inference operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn inference_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Inference,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a ClassifyError for invalid input.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for configuration errors.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for a dimension mismatch between two pipeline
    /// components.
    ///
    /// # Arguments
    ///
    /// * `component` - The component that received the mismatched input.
    /// * `expected` - The expected dimension.
    /// * `actual` - The dimension that was actually received.
    pub fn dimension_mismatch(component: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput {
            message: format!(
                "{} expected {} dimensions, but got {}",
                component, expected, actual
            ),
        }
    }
}

impl From<image::ImageError> for ClassifyError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for ClassifyError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}
