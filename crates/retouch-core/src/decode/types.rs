//! Types for opening images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extensions accepted when no other list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["bmp", "jpg", "jpeg"];

/// Error types for opening images.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file extension is not in the accepted list.
    #[error("Invalid image format '{extension}'. Please use one of: {accepted}")]
    UnsupportedExtension { extension: String, accepted: String },

    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a decodable image.
    #[error("Corrupted or unsupported image file: {0}")]
    CorruptedFile(String),
}

/// Options controlling how images are opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOptions {
    /// Accepted file extensions, lowercase, without the dot.
    pub extensions: Vec<String>,
    /// Rotate/flip the decoded pixels according to the EXIF orientation tag.
    pub apply_exif_orientation: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            apply_exif_orientation: true,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
