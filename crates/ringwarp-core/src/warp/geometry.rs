//! Polar geometry: output pixel to source position.
//!
//! The warp uses inverse mapping. For each output pixel centre we take polar
//! coordinates around the canvas centre and turn them back into a position
//! in the source raster:
//!
//! ```text
//! dx = px + 0.5 - cx          dy = cy - (py + 0.5)      (y up)
//! r  = hypot(dx, dy)          θ  = atan2(dy, dx)  in degrees
//! t  = dir * (θ - start)  mod 360                         dir = -1 clockwise
//! src_x = t / 360 * W
//! src_y = (r - bottom) / (top - bottom) * (H - 1)
//! ```

use super::types::{WarpOptions, WarpParameters};

const FULL_TURN: f64 = 360.0;

/// Canvas size used when no explicit size is given.
///
/// A square of side `2 * ceil(outer_radius)`, which contains the whole
/// annulus. Never smaller than 1x1.
pub fn compute_canvas_size(params: &WarpParameters) -> (u32, u32) {
    let side = 2.0 * params.outer_radius().ceil();
    // Saturating float-to-int cast; oversize values are caught at allocation.
    let side = (side as u32).max(1);
    (side, side)
}

/// Precomputed mapping from output pixels to source coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnnulusMapping {
    center_x: f64,
    center_y: f64,
    inner: f64,
    outer: f64,
    bottom: f64,
    /// `(H - 1) / (top - bottom)`, or `None` when both radii are equal.
    radial_scale: Option<f64>,
    start: f64,
    clockwise: bool,
    /// Source columns per degree.
    angular_scale: f64,
    src_width: f64,
}

impl AnnulusMapping {
    pub(crate) fn new(
        params: &WarpParameters,
        canvas: (u32, u32),
        src_width: u32,
        src_height: u32,
    ) -> Self {
        let span = params.top_radius - params.bottom_radius;
        let radial_scale = if span == 0.0 {
            None
        } else {
            Some((src_height as f64 - 1.0) / span)
        };

        Self {
            center_x: canvas.0 as f64 / 2.0,
            center_y: canvas.1 as f64 / 2.0,
            inner: params.inner_radius(),
            outer: params.outer_radius(),
            bottom: params.bottom_radius,
            radial_scale,
            start: params.start_angle.rem_euclid(FULL_TURN),
            clockwise: params.clockwise,
            angular_scale: src_width as f64 / FULL_TURN,
            src_width: src_width as f64,
        }
    }

    /// Resolve the canvas for a parameter set and its options.
    pub(crate) fn canvas_size(params: &WarpParameters, options: &WarpOptions) -> (u32, u32) {
        match options.output_size {
            Some(size) => (size.width, size.height),
            None => compute_canvas_size(params),
        }
    }

    /// Source position sampled by output pixel (px, py).
    ///
    /// Returns `None` when the pixel centre lies outside the annulus. The
    /// returned x is in `[0, W)`; y is in `[0, H - 1]` up to rounding.
    #[inline]
    pub(crate) fn source_position(&self, px: u32, py: u32) -> Option<(f64, f64)> {
        let dx = (px as f64 + 0.5) - self.center_x;
        let dy = self.center_y - (py as f64 + 0.5);
        let r = dx.hypot(dy);

        if r < self.inner || r > self.outer {
            return None;
        }

        let src_y = match self.radial_scale {
            Some(scale) => (r - self.bottom) * scale,
            None => 0.0,
        };

        // Exactly odd in dy: rows mirrored about the centre get mirrored angles.
        let theta = dy.abs().atan2(dx).to_degrees().copysign(dy);
        let offset = theta - self.start;
        let t = if self.clockwise { -offset } else { offset };
        let src_x = (t.rem_euclid(FULL_TURN) * self.angular_scale).rem_euclid(self.src_width);

        Some((src_x, src_y))
    }
}
