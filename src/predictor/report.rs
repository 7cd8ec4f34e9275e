//! Structured prediction results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A successful prediction: the winning label and the full confidence map.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted class name.
    pub label: String,
    /// Class name to confidence probability, one entry per mapped class.
    pub confidence_scores: BTreeMap<String, f32>,
}

/// The single structured document a prediction call produces.
///
/// Serialized as exactly one JSON object: either
/// `{"prediction": ..., "confidence_scores": {...}, "success": true}` or
/// `{"error": "..."}`. The predictor converts every internal failure into
/// the failure form; callers never see a raw error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionReport {
    /// A completed prediction.
    Success {
        /// The predicted class name.
        prediction: String,
        /// Class name to confidence probability.
        confidence_scores: BTreeMap<String, f32>,
        /// Always true in this form.
        success: bool,
    },
    /// A failed prediction, with a single message.
    Failure {
        /// What went wrong.
        error: String,
    },
}

impl PredictionReport {
    /// Creates a failure report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }

    /// Whether this report is the success form.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serializes the report as a single JSON line.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error": "failed to serialize prediction result"}"#.to_string())
    }
}

impl From<Prediction> for PredictionReport {
    fn from(prediction: Prediction) -> Self {
        Self::Success {
            prediction: prediction.label,
            confidence_scores: prediction.confidence_scores,
            success: true,
        }
    }
}
