//! Utility functions for images.

pub mod image;

pub use image::{dynamic_to_gray, dynamic_to_rgb, load_image, rgb_to_gray};
