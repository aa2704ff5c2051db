//! Image cropping.
//!
//! Crops to a pixel rectangle. The rectangle must lie within the image; it is
//! validated up front rather than padded or clamped.

use image::DynamicImage;
use log::debug;

use crate::types::{EditError, Rect};

/// Crop `image` to `rect`.
///
/// The result is `rect.width() x rect.height()` pixels and keeps the source
/// color mode exactly, alpha included, since cropping only copies samples.
///
/// # Errors
///
/// [`EditError::EmptyRect`] if `rect` has no area, or
/// [`EditError::RectOutOfBounds`] if it reaches past the image edges.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, RgbImage};
/// use retouch_core::{transform::crop, Rect};
///
/// let image = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
/// let cropped = crop(&image, Rect::new(25, 25, 75, 75)).unwrap();
/// assert_eq!(cropped.width(), 50);
/// assert_eq!(cropped.height(), 50);
/// ```
pub fn crop(image: &DynamicImage, rect: Rect) -> Result<DynamicImage, EditError> {
    rect.validate_within(image.width(), image.height())?;

    // Fast path: full crop returns a clone
    if rect == Rect::full(image.width(), image.height()) {
        return Ok(image.clone());
    }

    debug!(
        "crop {} from {}x{} image",
        rect,
        image.width(),
        image.height()
    );
    Ok(image.crop_imm(rect.left, rect.top, rect.width(), rect.height()))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::{Rgb, RgbImage};
    use proptest::prelude::*;

    /// Strategy for image dimensions plus a valid rectangle inside them.
    fn dims_and_rect() -> impl Strategy<Value = (u32, u32, Rect)> {
        (4u32..=60, 4u32..=60).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(left, top)| {
                (left + 1..=w, top + 1..=h).prop_map(move |(right, bottom)| {
                    (w, h, Rect::new(left, top, right, bottom))
                })
            })
        })
    }

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        }))
    }

    proptest! {
        /// Property: Output dimensions equal the rectangle's.
        #[test]
        fn prop_output_matches_rect((w, h, rect) in dims_and_rect()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            prop_assert_eq!(result.width(), rect.width());
            prop_assert_eq!(result.height(), rect.height());
        }

        /// Property: Cropped pixels come from the same position in the original.
        #[test]
        fn prop_pixels_from_original((w, h, rect) in dims_and_rect()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap().to_rgb8();

            for (x, y, pixel) in result.enumerate_pixels() {
                let expected = Rgb([((x + rect.left) % 256) as u8, ((y + rect.top) % 256) as u8, 0]);
                prop_assert_eq!(*pixel, expected);
            }
        }

        /// Property: Rectangles past the right or bottom edge are rejected.
        #[test]
        fn prop_oversized_rejected(
            (w, h) in (4u32..=60, 4u32..=60),
            overshoot in 1u32..=20,
        ) {
            let img = create_test_image(w, h);
            let result = crop(&img, Rect::new(0, 0, w + overshoot, h));
            let is_out_of_bounds = matches!(result, Err(EditError::RectOutOfBounds { .. }));
            prop_assert!(is_out_of_bounds);
        }
    }
}
