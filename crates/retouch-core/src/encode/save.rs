//! Saving edited images.
//!
//! The output format follows the file extension. JPEG output uses the
//! `image` crate's JPEG encoder with a configurable quality; images whose
//! color mode the target format can't store are converted to the nearest
//! 8-bit layout first.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorMode;

/// File name used when none is given.
pub const DEFAULT_FILE_NAME: &str = "modified_image";

/// Errors that can occur while saving.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The extension doesn't map to a format that can be written.
    #[error("Unsupported output format for '{0}'")]
    UnsupportedFormat(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoder rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Defaults for where and how images are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Directory used when the caller leaves it empty.
    pub dir: PathBuf,
    /// File name used when the caller leaves it empty.
    pub file_name: String,
    /// JPEG quality (1-100, where 100 is highest quality)
    pub jpeg_quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            jpeg_quality: 90,
        }
    }
}

/// Build the output path from user input.
///
/// Empty (or all-whitespace) `dir` and `file_name` fall back to the defaults
/// in `options`. A file name without an extension gets `fallback_extension`
/// appended, typically the extension of the image that was opened.
pub fn resolve_save_path(
    dir: &str,
    file_name: &str,
    options: &SaveOptions,
    fallback_extension: Option<&str>,
) -> PathBuf {
    let dir = match dir.trim() {
        "" => options.dir.clone(),
        d => PathBuf::from(d),
    };
    let file_name = match file_name.trim() {
        "" => options.file_name.as_str(),
        f => f,
    };

    let mut path = dir.join(file_name);
    if path.extension().is_none() {
        if let Some(ext) = fallback_extension {
            path.set_extension(ext);
        }
    }
    path
}

/// Encode `image` to bytes in `format`.
///
/// # Errors
///
/// `EncodeError::InvalidDimensions` for an empty image,
/// `EncodeError::UnsupportedFormat` if the format can't be written and
/// `EncodeError::EncodingFailed` if the encoder fails.
pub fn encode_image(
    image: &DynamicImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    if !format.writing_enabled() {
        return Err(EncodeError::UnsupportedFormat(format!("{format:?}")));
    }

    let image = storable(image, format);
    let mut buffer = Cursor::new(Vec::new());

    if format == ImageFormat::Jpeg {
        // Clamp quality to valid range (1-100)
        let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100));
        encoder
            .write_image(image.as_bytes(), width, height, image.color().into())
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    } else {
        image
            .write_to(&mut buffer, format)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }

    Ok(buffer.into_inner())
}

/// Save `image` to `path`, picking the format from the extension.
pub fn save_image(image: &DynamicImage, path: &Path, jpeg_quality: u8) -> Result<(), EncodeError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = encode_image(image, format, jpeg_quality)?;
    std::fs::write(path, bytes)?;
    info!("Image saved to {}", path.display());
    Ok(())
}

/// Convert to a layout `format` can store, borrowing when no change is needed.
fn storable(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    let mode = ColorMode::of(image);
    match format {
        // JPEG has no alpha and only 8-bit gray or RGB
        ImageFormat::Jpeg => match mode {
            ColorMode::L | ColorMode::Rgb => Cow::Borrowed(image),
            m if m.is_grayscale() => Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8())),
            _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        },
        ImageFormat::Bmp | ImageFormat::Png => match mode {
            ColorMode::L | ColorMode::La | ColorMode::Rgb | ColorMode::Rgba => Cow::Borrowed(image),
            ColorMode::L16 | ColorMode::La16 | ColorMode::Rgb16 | ColorMode::Rgba16
                if format == ImageFormat::Png =>
            {
                Cow::Borrowed(image)
            }
            ColorMode::L16 => Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8())),
            ColorMode::La16 => Cow::Owned(DynamicImage::ImageLumaA8(image.to_luma_alpha8())),
            ColorMode::Rgb16 | ColorMode::Rgb32F => {
                Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
            }
            ColorMode::Rgba16 | ColorMode::Rgba32F => {
                Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
            }
        },
        _ => Cow::Borrowed(image),
    }
}
