//! Color mode normalization.
//!
//! Every pixel operation works on a fixed channel layout: grayscale images
//! are processed as a single luma channel, everything else as 3-channel RGB.
//! [`normalize`] produces that working buffer and [`write_back`] copies the
//! edited samples into a copy of the original image, so the declared mode,
//! bit depth and alpha of an image never change across an edit.

use std::fmt;

use image::{ColorType, DynamicImage, ImageBuffer, Pixel};

use crate::types::{EditError, PixelBuffer, Rect};

/// The declared channel layout of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// 8-bit grayscale.
    L,
    /// 8-bit grayscale with alpha.
    La,
    /// 8-bit RGB.
    Rgb,
    /// 8-bit RGB with alpha.
    Rgba,
    /// 16-bit grayscale.
    L16,
    /// 16-bit grayscale with alpha.
    La16,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGB with alpha.
    Rgba16,
    /// 32-bit float RGB.
    Rgb32F,
    /// 32-bit float RGB with alpha.
    Rgba32F,
}

impl ColorMode {
    /// The color mode of a decoded image.
    pub fn of(image: &DynamicImage) -> Self {
        Self::from(image.color())
    }

    /// Short mode name, e.g. `"RGB"` or `"L"`.
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::L => "L",
            ColorMode::La => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::L16 => "I;16",
            ColorMode::La16 => "LA;16",
            ColorMode::Rgb16 => "RGB;16",
            ColorMode::Rgba16 => "RGBA;16",
            ColorMode::Rgb32F => "RGBF",
            ColorMode::Rgba32F => "RGBAF",
        }
    }

    pub fn is_grayscale(self) -> bool {
        matches!(
            self,
            ColorMode::L | ColorMode::La | ColorMode::L16 | ColorMode::La16
        )
    }

    /// Channel count of the working buffer used for this mode.
    #[inline]
    pub fn working_channels(self) -> usize {
        if self.is_grayscale() {
            1
        } else {
            3
        }
    }
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 => ColorMode::L,
            ColorType::La8 => ColorMode::La,
            ColorType::Rgb8 => ColorMode::Rgb,
            ColorType::Rgba8 => ColorMode::Rgba,
            ColorType::L16 => ColorMode::L16,
            ColorType::La16 => ColorMode::La16,
            ColorType::Rgb16 => ColorMode::Rgb16,
            ColorType::Rgba16 => ColorMode::Rgba16,
            ColorType::Rgb32F => ColorMode::Rgb32F,
            ColorType::Rgba32F => ColorMode::Rgba32F,
            other => match (other.has_color(), other.has_alpha()) {
                (true, true) => ColorMode::Rgba,
                (true, false) => ColorMode::Rgb,
                (false, true) => ColorMode::La,
                (false, false) => ColorMode::L,
            },
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert an image into its 8-bit working buffer.
///
/// Grayscale modes yield 1 channel, all others 3 channels.
pub fn normalize(image: &DynamicImage) -> PixelBuffer {
    let mode = ColorMode::of(image);
    let (width, height) = (image.width(), image.height());
    let channels = mode.working_channels();
    let data = if channels == 1 {
        image.to_luma8().into_raw()
    } else {
        image.to_rgb8().into_raw()
    };
    PixelBuffer::from_parts(width, height, channels, data)
}

/// Write the working buffer's samples inside `rect` back into a copy of
/// `original`.
///
/// Only color samples are written. Alpha, bit depth and every pixel outside
/// `rect` keep the original's values. 8-bit samples widen to 16-bit and
/// float the same way `image` converts them.
///
/// # Errors
///
/// [`EditError::BufferSizeMismatch`] if `working` isn't the original's
/// normalized shape, [`EditError::RectOutOfBounds`] if `rect` reaches outside
/// the image.
pub fn write_back(
    original: &DynamicImage,
    working: &PixelBuffer,
    rect: Rect,
) -> Result<DynamicImage, EditError> {
    let (width, height) = (original.width(), original.height());
    let channels = ColorMode::of(original).working_channels();
    if working.width() != width || working.height() != height || working.channels() != channels
    {
        return Err(EditError::BufferSizeMismatch {
            expected: width as usize * height as usize * channels,
            actual: working.data().len(),
        });
    }
    if rect.right > width || rect.bottom > height {
        return Err(EditError::RectOutOfBounds {
            rect,
            width,
            height,
        });
    }

    let mut image = original.clone();
    match &mut image {
        DynamicImage::ImageLuma8(img) => paste(img, working, rect, |s| s),
        DynamicImage::ImageLumaA8(img) => paste(img, working, rect, |s| s),
        DynamicImage::ImageRgb8(img) => paste(img, working, rect, |s| s),
        DynamicImage::ImageRgba8(img) => paste(img, working, rect, |s| s),
        DynamicImage::ImageLuma16(img) => paste(img, working, rect, widen_u16),
        DynamicImage::ImageLumaA16(img) => paste(img, working, rect, widen_u16),
        DynamicImage::ImageRgb16(img) => paste(img, working, rect, widen_u16),
        DynamicImage::ImageRgba16(img) => paste(img, working, rect, widen_u16),
        DynamicImage::ImageRgb32F(img) => paste(img, working, rect, widen_f32),
        DynamicImage::ImageRgba32F(img) => paste(img, working, rect, widen_f32),
        _ => {
            let channels = original.color().channel_count();
            return Err(EditError::UnsupportedChannels(channels.into()));
        }
    }
    Ok(image)
}

/// Copy the leading (color) channels of every pixel in `rect`.
fn paste<P: Pixel>(
    target: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    working: &PixelBuffer,
    rect: Rect,
    widen: impl Fn(u8) -> P::Subpixel,
) {
    for y in rect.top..rect.bottom {
        for x in rect.left..rect.right {
            let samples = working.pixel(x, y);
            let pixel = target.get_pixel_mut(x, y);
            // zip stops before alpha
            for (dst, &src) in pixel.channels_mut().iter_mut().zip(samples) {
                *dst = widen(src);
            }
        }
    }
}

#[inline]
fn widen_u16(sample: u8) -> u16 {
    u16::from(sample) * 257
}

#[inline]
fn widen_f32(sample: u8) -> f32 {
    f32::from(sample) / 255.0
}
