//! Brightness adjustment.
//!
//! Brightness is an additive offset applied to every sample of the working
//! buffer, clipped to `[0, 255]`. The image is normalized to its working
//! layout first and the adjusted color samples are written back into a copy
//! of the original, so alpha and color mode are kept.

use image::DynamicImage;
use log::debug;

use crate::color::{self, ColorMode};
use crate::types::{EditError, Rect};

/// Add `value` to every sample of an image, clipping at black and white.
///
/// Negative values darken. `value == 0` returns an unchanged copy.
///
/// # Example
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use retouch_core::adjustments::adjust_brightness;
///
/// let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([250])));
/// let brighter = adjust_brightness(&img, 20).unwrap();
/// assert_eq!(brighter.to_luma8().get_pixel(0, 0).0, [255]); // clipped
/// ```
pub fn adjust_brightness(image: &DynamicImage, value: i32) -> Result<DynamicImage, EditError> {
    if value == 0 {
        return Ok(image.clone());
    }

    let mut buffer = color::normalize(image);
    debug!(
        "brightness {:+} on {}x{} {} image",
        value,
        buffer.width(),
        buffer.height(),
        ColorMode::of(image)
    );
    apply_brightness(buffer.data_mut(), value);
    color::write_back(image, &buffer, Rect::full(image.width(), image.height()))
}

/// Add `value` to each sample in place, clipped to `[0, 255]`.
pub fn apply_brightness(samples: &mut [u8], value: i32) {
    if value == 0 {
        return;
    }
    for sample in samples.iter_mut() {
        *sample = (i32::from(*sample).saturating_add(value)).clamp(0, 255) as u8;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
