//! Region selection.
//!
//! Resolves the rectangle a blur applies to and exposes it as a borrowed view
//! over the parent buffer. Coordinates inside a [`RegionView`] are relative
//! to the region's own origin, so `(0, 0)` of the view is `(left, top)` of
//! the parent.

use crate::types::{EditError, PixelBuffer, Rect};

/// A read-only rectangular window into a [`PixelBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct RegionView<'a> {
    buffer: &'a PixelBuffer,
    rect: Rect,
}

impl<'a> RegionView<'a> {
    pub fn width(&self) -> u32 {
        self.rect.width()
    }

    pub fn height(&self) -> u32 {
        self.rect.height()
    }

    pub fn channels(&self) -> usize {
        self.buffer.channels()
    }

    /// The rectangle this view covers, in parent coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Samples of row `y` of the region (`width * channels` bytes).
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let channels = self.buffer.channels();
        let start = (self.rect.top + y) as usize * self.buffer.stride()
            + self.rect.left as usize * channels;
        let len = self.rect.width() as usize * channels;
        &self.buffer.data()[start..start + len]
    }

    /// Single sample at region-relative `(x, y)`, channel `c`.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: usize) -> u8 {
        self.row(y)[x as usize * self.buffer.channels() + c]
    }

    /// Copy the region out into its own buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        let len = self.height() as usize * self.width() as usize * self.channels();
        let mut data = Vec::with_capacity(len);
        for y in 0..self.height() {
            data.extend_from_slice(self.row(y));
        }
        PixelBuffer::from_parts(self.width(), self.height(), self.channels(), data)
    }
}

/// Select the region of `buffer` to operate on.
///
/// `None` selects the whole buffer. A given rectangle is checked against the
/// buffer first, so an empty or out-of-range selection is reported instead of
/// indexing past the data.
///
/// # Errors
///
/// [`EditError::EmptyRect`] or [`EditError::RectOutOfBounds`].
pub fn select_region(
    buffer: &PixelBuffer,
    selection: Option<Rect>,
) -> Result<RegionView<'_>, EditError> {
    let rect = match selection {
        Some(rect) => {
            rect.validate_within(buffer.width(), buffer.height())?;
            rect
        }
        None => Rect::full(buffer.width(), buffer.height()),
    };
    Ok(RegionView { buffer, rect })
}
