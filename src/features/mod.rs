//! Feature extraction for the classification pipeline.
//!
//! * [`extractor`] - The fixed 33-dimension extraction recipe
//! * [`histogram`] - Per-channel intensity histograms

pub mod extractor;
pub mod histogram;

pub use extractor::{
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_INPUT_SHAPE, FEATURE_LEN, FeatureExtractor,
    FeatureExtractorConfig, HISTOGRAM_BINS,
};
pub use histogram::IntensityHistogram;
