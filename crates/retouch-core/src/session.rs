//! Edit session holding the working image.
//!
//! A [`Session`] owns exactly one working image. Each [`Edit`] is applied to
//! it and the result replaces it; a failed edit leaves it untouched. There is
//! no history, so an edit can't be undone.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::DynamicImage;
use log::debug;

use crate::adjustments::adjust_brightness;
use crate::blur::blur;
use crate::color::ColorMode;
use crate::decode::{open_image, DecodeError, OpenOptions};
use crate::encode::{save_image, EncodeError};
use crate::transform::crop;
use crate::types::{EditError, Rect};

/// A single named transformation of the working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Add `value` to every sample, clipped to `[0, 255]`.
    Brightness { value: i32 },
    /// Keep only `rect`.
    Crop { rect: Rect },
    /// Box blur with half-width `radius`, over `selection` or the whole image.
    Blur {
        radius: u32,
        selection: Option<Rect>,
    },
}

impl Edit {
    /// Apply this edit to `image`, returning the new image.
    pub fn apply(&self, image: &DynamicImage) -> Result<DynamicImage, EditError> {
        match *self {
            Edit::Brightness { value } => adjust_brightness(image, value),
            Edit::Crop { rect } => crop(image, rect),
            Edit::Blur { radius, selection } => blur(image, radius, selection),
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Brightness { value } => write!(f, "brightness {value:+}"),
            Edit::Crop { rect } => write!(f, "crop {rect}"),
            Edit::Blur {
                radius,
                selection: Some(rect),
            } => write!(f, "blur radius {radius} in {rect}"),
            Edit::Blur {
                radius,
                selection: None,
            } => write!(f, "blur radius {radius}"),
        }
    }
}

/// The working image plus where it came from.
#[derive(Debug, Clone)]
pub struct Session {
    image: DynamicImage,
    source: Option<PathBuf>,
    applied: usize,
}

impl Session {
    /// Start a session on an in-memory image.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            source: None,
            applied: 0,
        }
    }

    /// Open `path` and start a session on it.
    pub fn open(path: &Path, options: &OpenOptions) -> Result<Self, DecodeError> {
        let image = open_image(path, options)?;
        Ok(Self {
            image,
            source: Some(path.to_path_buf()),
            applied: 0,
        })
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Extension of the source file, if the session was opened from disk.
    pub fn source_extension(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
    }

    /// Number of edits applied so far.
    pub fn applied_edits(&self) -> usize {
        self.applied
    }

    /// `"<width>x<height> <mode>"` of the working image.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} {}",
            self.image.width(),
            self.image.height(),
            ColorMode::of(&self.image)
        )
    }

    /// Apply `edit` and make its result the working image.
    ///
    /// On error the working image is left as it was.
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        let started = Instant::now();
        self.image = edit.apply(&self.image)?;
        self.applied += 1;
        debug!(
            "applied {} in {:.1}ms, now {}",
            edit,
            started.elapsed().as_secs_f64() * 1000.0,
            self.summary()
        );
        Ok(())
    }

    /// Save the working image to `path`.
    pub fn save(&self, path: &Path, jpeg_quality: u8) -> Result<(), EncodeError> {
        save_image(&self.image, path, jpeg_quality)
    }
}
