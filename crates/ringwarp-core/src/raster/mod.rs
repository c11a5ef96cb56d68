//! Owned raster images.
//!
//! [`RasterImage`] is a plain value type: an owned pixel buffer plus width,
//! height and channel count. Functions in this crate borrow their inputs and
//! return freshly allocated rasters, so ownership of every result moves to
//! the caller.
//!
//! # Layout
//!
//! - 8 bits per channel, 1 to 4 interleaved channels
//! - Row-major, top row first
//! - No row padding: `pixels.len() == width * height * channels`

mod convert;
mod types;

pub use types::{RasterError, RasterImage, MAX_CHANNELS};
