//! Core types shared by the editing operations.

use std::fmt;

use thiserror::Error;

/// Errors raised by the editing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The rectangle has no area (`left >= right` or `top >= bottom`).
    #[error("Empty rectangle {rect}: left must be < right and top must be < bottom")]
    EmptyRect { rect: Rect },

    /// The rectangle reaches outside the buffer it indexes into.
    #[error("Rectangle {rect} is outside the {width}x{height} image")]
    RectOutOfBounds { rect: Rect, width: u32, height: u32 },

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Working buffers hold either 1 (gray) or 3 (RGB) channels.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(usize),
}

/// An axis-aligned pixel rectangle, `right` and `bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle covering a whole `width x height` buffer.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check that the rectangle has area and lies inside a `width x height`
    /// buffer.
    pub fn validate_within(&self, width: u32, height: u32) -> Result<(), EditError> {
        if self.left >= self.right || self.top >= self.bottom {
            return Err(EditError::EmptyRect { rect: *self });
        }
        if self.right > width || self.bottom > height {
            return Err(EditError::RectOutOfBounds {
                rect: *self,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Whether the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// An interleaved 8-bit pixel buffer in row-major order.
///
/// Samples are indexed `[row][col][channel]`, flattened as
/// `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing sample data, checking its length against the shape.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, EditError> {
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(EditError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap sample data whose length the caller already guarantees, such as
    /// the raw output of an `image::ImageBuffer`.
    pub(crate) fn from_parts(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// A zero-filled buffer of the given shape.
    pub fn zeroed(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels
    }

    /// The samples of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = y as usize * self.stride() + x as usize * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride() + x as usize * self.channels;
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// Same width, height and channel count.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }
}
