//! ringwarp Core - Circular image warp
//!
//! This crate maps rectangular raster images onto an annulus: source columns
//! run around the ring, source rows run from the bottom radius to the top
//! radius. It also provides the owned raster type the warp works on and the
//! horizontal wraparound shift used to rotate a map before warping.
//!
//! All operations borrow their input and return a new image. Nothing is
//! cached between calls.

pub mod raster;
pub mod transform;
pub mod warp;

pub use raster::{RasterError, RasterImage};
pub use transform::horizontal_shift;
pub use warp::{
    circular_warp, circular_warp_cancellable, circular_warp_with_options, compute_canvas_size,
    OutputSize, SampleFilter, WarpError, WarpOptions, WarpParameters,
};
