//! Image encoding.
//!
//! Saves the working image in the format named by the output file's
//! extension (JPEG, PNG or BMP).
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::{resolve_save_path, save_image, SaveOptions};
//!
//! let opts = SaveOptions::default();
//! let path = resolve_save_path("", "holiday", &opts, Some("jpg"));
//! save_image(&image, &path, opts.jpeg_quality).unwrap();
//! ```

mod save;

pub use save::{
    encode_image, resolve_save_path, save_image, EncodeError, SaveOptions, DEFAULT_FILE_NAME,
};
