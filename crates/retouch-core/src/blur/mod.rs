//! Box blur over a whole image or a rectangular selection.
//!
//! A blur runs three stages in order:
//!
//! 1. [`select_region`] resolves the target rectangle and borrows a view of it
//! 2. [`box_mean`] averages every pixel of the view over a clamped square window
//! 3. [`composite`] writes the filtered pixels back into the full buffer
//!
//! [`blur`] runs the pipeline on the image's normalized working buffer and
//! writes only the blurred rectangle back, so pixels outside it and the
//! alpha channel keep their original values and bit depth.
//!
//! # Coordinate System
//!
//! - Rectangles are `(left, top, right, bottom)` in image pixels
//! - `right` and `bottom` are exclusive
//! - Origin is top-left corner

mod composite;
mod filter;
mod region;

pub use composite::composite;
pub use filter::{box_mean, box_mean_reference};
pub use region::{select_region, RegionView};

use image::DynamicImage;
use log::{debug, info};

use crate::color;
use crate::types::{EditError, PixelBuffer, Rect};

/// Blur an image, or only the `selection` rectangle of it.
///
/// The averaging window has half-width `radius` and is clamped to the
/// selection's own edges, so pixels just outside the selection never bleed
/// in. Everything outside the selection is left byte-for-byte unchanged, as
/// is the alpha channel. A radius of 0 returns an unchanged copy.
///
/// # Errors
///
/// Returns [`EditError::EmptyRect`] or [`EditError::RectOutOfBounds`] if the
/// selection doesn't describe a non-empty area inside the image.
pub fn blur(
    image: &DynamicImage,
    radius: u32,
    selection: Option<Rect>,
) -> Result<DynamicImage, EditError> {
    let rect = match selection {
        Some(rect) => {
            rect.validate_within(image.width(), image.height())?;
            rect
        }
        None => Rect::full(image.width(), image.height()),
    };
    if radius == 0 {
        debug!("box blur: radius 0 leaves {} unchanged", rect);
        return Ok(image.clone());
    }

    let mut buffer = color::normalize(image);
    blur_buffer(&mut buffer, radius, selection)?;
    color::write_back(image, &buffer, rect)
}

/// Blur a working buffer in place. See [`blur`].
pub fn blur_buffer(
    buffer: &mut PixelBuffer,
    radius: u32,
    selection: Option<Rect>,
) -> Result<(), EditError> {
    let filtered = {
        let region = select_region(buffer, selection)?;
        match selection {
            Some(_) => info!("Blurring the selected area..."),
            None => info!("Blurring the whole image..."),
        }
        debug!(
            "box blur: region {} ({}x{}x{}), radius {}",
            region.rect(),
            region.width(),
            region.height(),
            region.channels(),
            radius
        );
        box_mean(&region, radius)
    };

    composite(buffer, selection, filtered)?;
    info!("Blurring done.");
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
