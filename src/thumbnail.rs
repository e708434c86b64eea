//! Aspect-preserving thumbnailing.
//!
//! Lanczos3 resampling: this is a one-shot offline render, so quality wins
//! over speed. Images already inside the bounding box are returned as-is,
//! never upscaled.
//!
//! The two call sites use one bound each: the logo strip is constrained by
//! width and the photograph by height, with the other axis following from
//! the aspect ratio.

use image::{DynamicImage, imageops::FilterType};

/// Largest image no wider than `max_width` and no taller than `max_height`
/// that preserves the source aspect ratio.
pub fn thumbnail(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if img.width() <= max_width && img.height() <= max_height {
        return img.clone();
    }
    img.resize(max_width, max_height, FilterType::Lanczos3)
}

/// Bound only the width; height follows the aspect ratio.
pub fn fit_width(img: &DynamicImage, max_width: u32) -> DynamicImage {
    thumbnail(img, max_width, u32::MAX)
}

/// Bound only the height; width follows the aspect ratio.
pub fn fit_height(img: &DynamicImage, max_height: u32) -> DynamicImage {
    thumbnail(img, u32::MAX, max_height)
}
