//! Writing a filtered region back into its parent buffer.

use crate::types::{EditError, PixelBuffer, Rect};

/// Write `filtered` into `target` at the selection's origin.
///
/// With no selection the filtered buffer covers the whole image and simply
/// replaces `target`. Pixels outside the selection are never touched.
///
/// # Errors
///
/// [`EditError::BufferSizeMismatch`] if `filtered` doesn't have the shape of
/// the selection, or the rectangle errors if the selection doesn't fit
/// `target`.
pub fn composite(
    target: &mut PixelBuffer,
    selection: Option<Rect>,
    filtered: PixelBuffer,
) -> Result<(), EditError> {
    let rect = match selection {
        Some(rect) => rect,
        None => {
            if !target.same_shape(&filtered) {
                return Err(size_mismatch(target.data().len(), &filtered));
            }
            *target = filtered;
            return Ok(());
        }
    };

    rect.validate_within(target.width(), target.height())?;
    let channels = target.channels();
    let row_len = rect.width() as usize * channels;
    if filtered.channels() != channels
        || filtered.width() != rect.width()
        || filtered.height() != rect.height()
    {
        return Err(size_mismatch(row_len * rect.height() as usize, &filtered));
    }

    let stride = target.stride();
    let left = rect.left as usize * channels;
    let dst = target.data_mut();
    for (y, src_row) in filtered.data().chunks_exact(row_len).enumerate() {
        let start = (rect.top as usize + y) * stride + left;
        dst[start..start + row_len].copy_from_slice(src_row);
    }

    Ok(())
}

fn size_mismatch(expected: usize, filtered: &PixelBuffer) -> EditError {
    EditError::BufferSizeMismatch {
        expected,
        actual: filtered.data().len(),
    }
}
