//! Pretrained feature scaler.

use crate::core::traits::Scaler;
use crate::core::{ClassifyError, ClassifyResult};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// A fitted per-dimension affine scaler.
///
/// Deserialized from a JSON document of shape
/// `{"mean": [...], "scale": [...]}`. Each output value is
/// `(x - mean[d]) / scale[d]` for dimension `d`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-dimension center subtracted before scaling.
    pub mean: Vec<f32>,
    /// Per-dimension divisor.
    pub scale: Vec<f32>,
}

impl StandardScaler {
    /// Checks the internal consistency of a deserialized scaler.
    ///
    /// The mean and scale vectors must have the same length, and every scale
    /// entry must be finite and non-zero.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.mean.len() != self.scale.len() {
            return Err(ClassifyError::config_error(format!(
                "scaler mean has {} dimensions but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.is_empty() {
            return Err(ClassifyError::config_error("scaler has no dimensions"));
        }
        for (index, &value) in self.scale.iter().enumerate() {
            if !value.is_finite() || value == 0.0 {
                return Err(ClassifyError::config_error(format!(
                    "scaler scale at dimension {} must be finite and non-zero, got {}",
                    index, value
                )));
            }
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>> {
        if batch.ncols() != self.mean.len() {
            return Err(ClassifyError::dimension_mismatch(
                "scaler",
                self.mean.len(),
                batch.ncols(),
            ));
        }

        let mut scaled = batch.to_owned();
        for mut row in scaled.rows_mut() {
            for (value, (&mean, &scale)) in
                row.iter_mut().zip(self.mean.iter().zip(self.scale.iter()))
            {
                *value = (*value - mean) / scale;
            }
        }
        Ok(scaled)
    }
}
