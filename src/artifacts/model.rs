//! Pretrained classifier families.
//!
//! Classifier artifacts are JSON documents with a `"kind"` tag selecting the
//! model family. Two closed-form families are supported: logistic regression
//! (binary via a single coefficient row, multinomial via one row per class)
//! and Gaussian naive Bayes. Both expose the [`Classifier`] capability set.

use crate::core::traits::Classifier;
use crate::core::{ClassifyError, ClassifyResult};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// A fitted logistic-regression classifier.
///
/// With a single coefficient row the model is binary: the row scores the
/// positive class (column 1 of the probability output). With `k > 1` rows it
/// is multinomial over `k` classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    /// Coefficient rows, one per output unit.
    pub coefficients: Vec<Vec<f32>>,
    /// Intercepts, one per output unit.
    pub intercepts: Vec<f32>,
}

impl LogisticRegressionModel {
    /// Checks the internal consistency of a deserialized model.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.coefficients.is_empty() {
            return Err(ClassifyError::config_error(
                "logistic regression model has no coefficient rows",
            ));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(ClassifyError::config_error(
                "logistic regression coefficient rows are empty",
            ));
        }
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(ClassifyError::config_error(
                "logistic regression coefficient rows have inconsistent lengths",
            ));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ClassifyError::config_error(format!(
                "logistic regression has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        Ok(())
    }

    fn decision_scores(&self, sample: ArrayView1<f32>) -> Vec<f32> {
        self.coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, &intercept)| {
                let dot: f32 = row
                    .iter()
                    .zip(sample.iter())
                    .map(|(&weight, &value)| weight * value)
                    .sum();
                dot + intercept
            })
            .collect()
    }
}

impl Classifier for LogisticRegressionModel {
    fn n_classes(&self) -> usize {
        if self.coefficients.len() == 1 {
            2
        } else {
            self.coefficients.len()
        }
    }

    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>> {
        if batch.ncols() != self.n_features() {
            return Err(ClassifyError::dimension_mismatch(
                "classifier",
                self.n_features(),
                batch.ncols(),
            ));
        }

        let mut probabilities = Array2::zeros((batch.nrows(), self.n_classes()));
        for (sample, mut out) in batch.rows().into_iter().zip(probabilities.rows_mut()) {
            let scores = self.decision_scores(sample);
            if scores.len() == 1 {
                let positive = sigmoid(scores[0]);
                out[0] = 1.0 - positive;
                out[1] = positive;
            } else {
                for (slot, value) in out.iter_mut().zip(softmax(&scores)) {
                    *slot = value;
                }
            }
        }
        Ok(probabilities)
    }
}

/// A fitted Gaussian naive Bayes classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNaiveBayesModel {
    /// Per-class prior probabilities.
    pub class_priors: Vec<f32>,
    /// Per-class feature means, one row per class.
    pub means: Vec<Vec<f32>>,
    /// Per-class feature variances, one row per class.
    pub variances: Vec<Vec<f32>>,
}

impl GaussianNaiveBayesModel {
    /// Checks the internal consistency of a deserialized model.
    pub fn validate(&self) -> ClassifyResult<()> {
        let classes = self.class_priors.len();
        if classes == 0 {
            return Err(ClassifyError::config_error(
                "naive Bayes model has no classes",
            ));
        }
        if self.means.len() != classes || self.variances.len() != classes {
            return Err(ClassifyError::config_error(format!(
                "naive Bayes has {} priors but {} mean rows and {} variance rows",
                classes,
                self.means.len(),
                self.variances.len()
            )));
        }
        let width = self.means[0].len();
        if width == 0 {
            return Err(ClassifyError::config_error("naive Bayes mean rows are empty"));
        }
        if self.means.iter().any(|row| row.len() != width)
            || self.variances.iter().any(|row| row.len() != width)
        {
            return Err(ClassifyError::config_error(
                "naive Bayes rows have inconsistent lengths",
            ));
        }
        if self.class_priors.iter().any(|&prior| prior <= 0.0) {
            return Err(ClassifyError::config_error(
                "naive Bayes class priors must be positive",
            ));
        }
        for row in &self.variances {
            if row.iter().any(|&variance| variance <= 0.0) {
                return Err(ClassifyError::config_error(
                    "naive Bayes variances must be positive",
                ));
            }
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, sample: ArrayView1<f32>) -> Vec<f32> {
        const LN_TWO_PI: f64 = 1.837_877_066_409_345_5;

        self.class_priors
            .iter()
            .zip(self.means.iter().zip(self.variances.iter()))
            .map(|(&prior, (means, variances))| {
                let mut log_likelihood = f64::from(prior).ln();
                for ((&value, &mean), &variance) in
                    sample.iter().zip(means.iter()).zip(variances.iter())
                {
                    let variance = f64::from(variance);
                    let deviation = f64::from(value) - f64::from(mean);
                    log_likelihood -=
                        0.5 * ((LN_TWO_PI + variance.ln()) + deviation * deviation / variance);
                }
                log_likelihood as f32
            })
            .collect()
    }
}

impl Classifier for GaussianNaiveBayesModel {
    fn n_classes(&self) -> usize {
        self.class_priors.len()
    }

    fn n_features(&self) -> usize {
        self.means.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>> {
        if batch.ncols() != self.n_features() {
            return Err(ClassifyError::dimension_mismatch(
                "classifier",
                self.n_features(),
                batch.ncols(),
            ));
        }

        let mut probabilities = Array2::zeros((batch.nrows(), self.n_classes()));
        for (sample, mut out) in batch.rows().into_iter().zip(probabilities.rows_mut()) {
            let log_likelihoods = self.joint_log_likelihood(sample);
            for (slot, value) in out.iter_mut().zip(softmax(&log_likelihoods)) {
                *slot = value;
            }
        }
        Ok(probabilities)
    }
}

/// A pretrained classifier artifact, tagged by model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PretrainedClassifier {
    /// Logistic regression (binary or multinomial).
    LogisticRegression(LogisticRegressionModel),
    /// Gaussian naive Bayes.
    GaussianNaiveBayes(GaussianNaiveBayesModel),
}

impl PretrainedClassifier {
    /// Checks the internal consistency of a deserialized classifier.
    pub fn validate(&self) -> ClassifyResult<()> {
        match self {
            Self::LogisticRegression(model) => model.validate(),
            Self::GaussianNaiveBayes(model) => model.validate(),
        }
    }
}

impl Classifier for PretrainedClassifier {
    fn n_classes(&self) -> usize {
        match self {
            Self::LogisticRegression(model) => model.n_classes(),
            Self::GaussianNaiveBayes(model) => model.n_classes(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression(model) => model.n_features(),
            Self::GaussianNaiveBayes(model) => model.n_features(),
        }
    }

    fn predict_proba(&self, batch: ArrayView2<f32>) -> ClassifyResult<Array2<f32>> {
        match self {
            Self::LogisticRegression(model) => model.predict_proba(batch),
            Self::GaussianNaiveBayes(model) => model.predict_proba(batch),
        }
    }
}

fn sigmoid(score: f32) -> f32 {
    1.0 / (1.0 + (-score).exp())
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exponentials: Vec<f32> = scores.iter().map(|&score| (score - max).exp()).collect();
    let total: f32 = exponentials.iter().sum();
    exponentials.into_iter().map(|value| value / total).collect()
}
