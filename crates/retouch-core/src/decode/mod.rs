//! Image decoding.
//!
//! Opens BMP and JPEG files (or whatever extensions are configured), guesses
//! the format from the file content and optionally applies the EXIF
//! orientation tag so the pixels match what image viewers display.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::{open_image, OpenOptions};
//!
//! let image = open_image(Path::new("photo.jpg"), &OpenOptions::default()).unwrap();
//! println!("Opened {}x{} image", image.width(), image.height());
//! ```

mod open;
mod types;

pub use open::{check_extension, decode_bytes, open_image};
pub use types::{DecodeError, OpenOptions, DEFAULT_EXTENSIONS};
