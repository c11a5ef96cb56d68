//! Raster transforms applied before warping.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Positive horizontal shifts move content right

mod shift;

pub use shift::horizontal_shift;
