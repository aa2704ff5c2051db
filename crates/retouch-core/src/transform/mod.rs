//! Geometric transforms.
//!
//! # Coordinate System
//!
//! - Crop rectangles are `(left, top, right, bottom)` in pixels
//! - `right` and `bottom` are exclusive
//! - Origin is top-left corner

mod crop;

pub use crop::crop;
