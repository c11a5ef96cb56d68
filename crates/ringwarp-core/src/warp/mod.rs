//! Circular (annulus) warp.
//!
//! Wraps a rectangular image around a ring: source columns become angles,
//! source rows become radii between `bottom_radius` and `top_radius`. A full
//! turn spans the source width, so an equirectangular world map becomes a
//! polar disc.
//!
//! # Algorithm
//!
//! Inverse mapping: for each output pixel we compute its polar coordinates
//! around the canvas centre, discard it if it lies outside the annulus, and
//! otherwise sample the source at the matching (column, row). Sampling wraps
//! horizontally (angular continuity) and clamps vertically.
//!
//! # Coordinate System
//!
//! - Angles are in degrees, 0 = 3 o'clock, positive = counter-clockwise
//! - `start_angle` is where source column 0 lands
//! - `clockwise` lays increasing columns out clockwise on screen
//! - Output origin is the top-left corner; the annulus is centred on the canvas

mod circular;
mod geometry;
mod sample;
mod types;

pub use circular::{circular_warp, circular_warp_cancellable, circular_warp_with_options};
pub use geometry::compute_canvas_size;
pub use sample::SampleFilter;
pub use types::{OutputSize, WarpError, WarpOptions, WarpParameters};
