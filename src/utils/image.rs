//! Utility functions for image loading and color conversion.

use crate::core::ClassifyError;
use image::{DynamicImage, GrayImage, RgbImage};

/// Converts a DynamicImage to an RgbImage.
///
/// This function takes a DynamicImage (which can be in any format) and
/// converts it to an RgbImage (8-bit RGB format).
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Converts a DynamicImage to a GrayImage.
///
/// This function takes a DynamicImage (which can be in any format) and
/// converts it to a GrayImage (8-bit grayscale format).
pub fn dynamic_to_gray(img: DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Converts an RgbImage to a GrayImage using the crate's fixed luma recipe.
///
/// The grayscale step is part of the feature-extraction recipe: a scaler and
/// model fitted against one luma formula are incompatible with features
/// produced by another.
pub fn rgb_to_gray(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// This function opens an image from the specified file path and converts it
/// to an RgbImage. It handles any image format supported by the image crate.
///
/// # Arguments
///
/// * `path` - A reference to the path of the image file to load
///
/// # Returns
///
/// * `Ok(RgbImage)` - The loaded and converted RGB image
/// * `Err(ClassifyError)` - An error if the image could not be loaded
///
/// # Errors
///
/// This function will return a `ClassifyError::ImageLoad` error if the image
/// cannot be loaded from the specified path, or if there is an error during
/// conversion.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, ClassifyError> {
    let img = image::open(path).map_err(ClassifyError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}
