//! Capability traits for the pretrained pipeline artifacts.
//!
//! The predictor is written against these interfaces rather than concrete
//! model families: a classifier is anything that can `predict` and
//! `predict_proba` over a batch, a scaler anything that can `transform` one.

use crate::core::errors::{ClassifyError, ClassifyResult};
use ndarray::{Array2, ArrayView2};

/// Trait for a fitted classifier.
///
/// A classifier consumes a batch of feature rows and produces one class
/// index and one probability row per input row. The probability row has
/// `n_classes` columns; probabilities are the classifier's contract and are
/// not re-validated downstream.
pub trait Classifier {
    /// Number of output classes.
    fn n_classes(&self) -> usize;

    /// Number of input feature dimensions.
    fn n_features(&self) -> usize;

    /// Computes per-class probabilities for each row of the batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - A batch of feature rows, one sample per row.
    ///
    /// # Returns
    ///
    /// A matrix with one probability row per input row.
    fn predict_proba(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>>;

    /// Predicts the most probable class index for each row of the batch.
    ///
    /// The default implementation takes the argmax of `predict_proba`; ties
    /// resolve to the lowest index.
    fn predict(&self, batch: ArrayView2<f32>) -> ClassifyResult<Vec<usize>> {
        let probabilities = self.predict_proba(batch)?;
        probabilities
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
                    .map(|(index, _)| index)
                    .ok_or_else(|| ClassifyError::invalid_input("empty probability row"))
            })
            .collect()
    }
}

/// Trait for a fitted feature scaler.
///
/// A scaler applies a per-dimension affine transform to a batch of feature
/// rows, preserving the batch shape.
pub trait Scaler {
    /// Number of feature dimensions the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Transforms each row of the batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - A batch of feature rows, one sample per row.
    fn transform(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>>;
}
