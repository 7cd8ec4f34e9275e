//! Image feature extraction.
//!
//! Turns a raw image into the fixed-length numeric vector the pretrained
//! scaler/model pair was fitted on. The recipe is part of the compatibility
//! contract: resize to a fixed shape, take per-channel color statistics and
//! intensity histograms, then grayscale edge and texture statistics, in a
//! fixed concatenation order. Changing any step invalidates previously
//! fitted artifacts.

use crate::core::config::{ConfigError, ConfigValidator};
use crate::core::{ClassifyResult, ConfigValidatorExt};
use crate::features::histogram::IntensityHistogram;
use crate::utils::{load_image, rgb_to_gray};
use image::RgbImage;
use image::imageops::{self, FilterType};
use imageproc::edges::canny;
use ndarray::Array1;
use std::path::Path;
use tracing::warn;

/// Length of the extracted feature vector.
///
/// 3 channel means + 3 channel standard deviations + 3 channels x 8 histogram
/// bins + edge fraction + grayscale standard deviation + grayscale mean.
pub const FEATURE_LEN: usize = 33;

/// Number of histogram bins per channel. Fixed by the extraction recipe.
pub const HISTOGRAM_BINS: usize = 8;

/// Default resize target applied before any statistics are computed.
pub const DEFAULT_INPUT_SHAPE: (u32, u32) = (64, 64);

/// Default low threshold for the edge detector, on the 8-bit intensity scale.
pub const DEFAULT_CANNY_LOW: f32 = 50.0;

/// Default high threshold for the edge detector, on the 8-bit intensity scale.
pub const DEFAULT_CANNY_HIGH: f32 = 150.0;

/// Configuration for the feature extractor.
///
/// All fields are optional; unset fields fall back to the recipe defaults.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FeatureExtractorConfig {
    /// Resize target (width, height) applied before statistics are computed.
    pub input_shape: Option<(u32, u32)>,
    /// Low threshold for the edge detector.
    pub canny_low: Option<f32>,
    /// High threshold for the edge detector.
    pub canny_high: Option<f32>,
}

impl FeatureExtractorConfig {
    /// Creates a configuration with all fields unset, i.e. recipe defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigValidator for FeatureExtractorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some((width, height)) = self.input_shape {
            self.validate_image_dimensions(width, height)?;
        }

        let low = self.canny_low.unwrap_or(DEFAULT_CANNY_LOW);
        let high = self.canny_high.unwrap_or(DEFAULT_CANNY_HIGH);
        self.validate_f32_range(low, 0.0, 255.0, "canny_low")?;
        self.validate_f32_range(high, 0.0, 255.0, "canny_high")?;
        self.validate_threshold_pair(low, high, "canny")?;

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Extracts the fixed-length feature vector from images.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    /// Resize target (width, height).
    input_shape: (u32, u32),
    /// Low threshold for the edge detector.
    canny_low: f32,
    /// High threshold for the edge detector.
    canny_high: f32,
    /// Per-channel histogram processor.
    histogram: IntensityHistogram,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            input_shape: DEFAULT_INPUT_SHAPE,
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            histogram: IntensityHistogram::default(),
        }
    }
}

impl FeatureExtractor {
    /// Creates a feature extractor from a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Extraction parameters; unset fields use recipe defaults.
    ///
    /// # Returns
    ///
    /// The extractor, or a configuration error if validation fails.
    pub fn new(config: FeatureExtractorConfig) -> ClassifyResult<Self> {
        let config = config.validate_and_wrap()?;
        Ok(Self {
            input_shape: config.input_shape.unwrap_or(DEFAULT_INPUT_SHAPE),
            canny_low: config.canny_low.unwrap_or(DEFAULT_CANNY_LOW),
            canny_high: config.canny_high.unwrap_or(DEFAULT_CANNY_HIGH),
            histogram: IntensityHistogram::new(HISTOGRAM_BINS)?,
        })
    }

    /// The resize target this extractor applies.
    pub fn input_shape(&self) -> (u32, u32) {
        self.input_shape
    }

    /// Extracts features from an image file.
    ///
    /// Returns `None` if the file cannot be decoded or any extraction step
    /// fails; the cause is logged as a diagnostic and the caller is expected
    /// to skip the image. Never panics.
    pub fn extract(&self, path: &Path) -> Option<Array1<f32>> {
        match self.try_extract(path) {
            Ok(features) => Some(features),
            Err(error) => {
                warn!("Error processing image {}: {}", path.display(), error);
                None
            }
        }
    }

    /// Extracts features from an image file, surfacing the failure cause.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the image to process.
    ///
    /// # Returns
    ///
    /// The feature vector, or the error that stopped extraction.
    pub fn try_extract(&self, path: &Path) -> ClassifyResult<Array1<f32>> {
        let img = load_image(path)?;
        self.extract_from_image(&img)
    }

    /// Extracts features from an already decoded RGB image.
    ///
    /// The vector layout is fixed: per-channel means (3), per-channel
    /// standard deviations (3), per-channel 8-bin histograms in R,G,B order
    /// (24), edge-pixel fraction (1), grayscale standard deviation (1),
    /// grayscale mean (1).
    pub fn extract_from_image(&self, img: &RgbImage) -> ClassifyResult<Array1<f32>> {
        let (width, height) = self.input_shape;
        let resized = imageops::resize(img, width, height, FilterType::Triangle);
        let pixel_count = f64::from(width) * f64::from(height);

        let mut features: Vec<f32> = Vec::with_capacity(FEATURE_LEN);

        // Color features: per-channel mean, then per-channel std.
        let mut sums = [0f64; 3];
        let mut squared_sums = [0f64; 3];
        for pixel in resized.pixels() {
            for channel in 0..3 {
                let value = f64::from(pixel[channel]);
                sums[channel] += value;
                squared_sums[channel] += value * value;
            }
        }
        let means: Vec<f64> = sums.iter().map(|sum| sum / pixel_count).collect();
        features.extend(means.iter().map(|&mean| mean as f32));
        for channel in 0..3 {
            let variance = (squared_sums[channel] / pixel_count - means[channel] * means[channel])
                .max(0.0);
            features.push(variance.sqrt() as f32);
        }

        // Histogram features, channel order R, G, B, bins ascending.
        for channel in 0..3 {
            features.extend(self.histogram.compute(&resized, channel)?);
        }

        // Edge features: fraction of pixels the detector marks as edges.
        let gray = rgb_to_gray(&resized);
        let edges = canny(&gray, self.canny_low, self.canny_high);
        let edge_pixels = edges.iter().filter(|&&value| value > 0).count();
        features.push((edge_pixels as f64 / pixel_count) as f32);

        // Grayscale texture features: std, then mean.
        let mut gray_sum = 0f64;
        let mut gray_squared_sum = 0f64;
        for &value in gray.iter() {
            let value = f64::from(value);
            gray_sum += value;
            gray_squared_sum += value * value;
        }
        let gray_mean = gray_sum / pixel_count;
        let gray_variance = (gray_squared_sum / pixel_count - gray_mean * gray_mean).max(0.0);
        features.push(gray_variance.sqrt() as f32);
        features.push(gray_mean as f32);

        debug_assert_eq!(features.len(), FEATURE_LEN);
        Ok(Array1::from_vec(features))
    }
}
