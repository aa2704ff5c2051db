//! Retouch Core - Image editing library
//!
//! This crate provides the editing operations behind Retouch: a box blur
//! over the whole image or a rectangular selection, brightness adjustment,
//! cropping, plus opening and saving images.
//!
//! # Module Structure
//!
//! - `blur` - Region selection, box-average filter and compositing
//! - `adjustments` - Additive brightness with clipping
//! - `transform` - Cropping
//! - `color` - Color mode normalization around pixel operations
//! - `decode` / `encode` - Opening and saving files
//! - `session` - The working image and the edits applied to it

pub mod adjustments;
pub mod blur;
pub mod color;
pub mod decode;
pub mod encode;
pub mod session;
pub mod transform;
mod types;

pub use adjustments::adjust_brightness;
pub use blur::blur;
pub use color::ColorMode;
pub use session::{Edit, Session};
pub use transform::crop;
pub use types::{EditError, PixelBuffer, Rect};
