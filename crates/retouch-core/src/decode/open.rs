//! Opening images from disk with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use log::{debug, info};

use super::types::Orientation;
use super::{DecodeError, OpenOptions};

/// Open the image at `path`.
///
/// The extension is checked against `options.extensions` before anything is
/// read. The format itself is guessed from the file content.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedExtension` for a rejected extension,
/// `DecodeError::Io` if the file can't be read and
/// `DecodeError::CorruptedFile` if it doesn't decode.
pub fn open_image(path: &Path, options: &OpenOptions) -> Result<DynamicImage, DecodeError> {
    check_extension(path, &options.extensions)?;
    let bytes = std::fs::read(path)?;
    let img = decode_bytes(&bytes, options.apply_exif_orientation)?;
    info!(
        "Image opened from {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Check that `path` has one of the `accepted` extensions (case-insensitive).
pub fn check_extension(path: &Path, accepted: &[String]) -> Result<(), DecodeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if accepted.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedExtension {
            extension,
            accepted: accepted.join(", "),
        })
    }
}

/// Decode an image from bytes, optionally applying EXIF orientation.
pub fn decode_bytes(bytes: &[u8], apply_exif_orientation: bool) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if !apply_exif_orientation {
        return Ok(img);
    }

    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Normal {
        debug!("applying EXIF orientation {:?}", orientation);
    }
    Ok(apply_orientation(img, orientation))
}

/// EXIF orientation of the file bytes, `Orientation::Normal` if there is no
/// EXIF data or no readable orientation tag.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
