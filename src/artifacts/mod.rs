//! Pretrained artifacts consumed by the pipeline.
//!
//! * [`loader`] - Artifact path checks, deserialization, cross-validation
//! * [`model`] - Supported classifier families
//! * [`scaler`] - The fitted feature scaler
//! * [`mapping`] - The class-name mapping

pub mod loader;
pub mod mapping;
pub mod model;
pub mod scaler;

pub use loader::{ArtifactPaths, ArtifactSet};
pub use mapping::ClassMapping;
pub use model::{GaussianNaiveBayesModel, LogisticRegressionModel, PretrainedClassifier};
pub use scaler::StandardScaler;
