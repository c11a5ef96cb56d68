//! Source sampling with horizontal wraparound.
//!
//! The source is wrapped around a full turn, so column `W - 1` is adjacent
//! to column 0. Rows run from the bottom radius to the top radius and do not
//! wrap: they clamp at `[0, H - 1]`.

use crate::raster::RasterImage;

/// Sampling strategy for warp operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    /// Nearest source pixel.
    Nearest,
    /// Weighted average of the 4 nearest source pixels.
    #[default]
    Bilinear,
}

impl SampleFilter {
    /// Map the `interpolate` flag onto a filter.
    pub fn from_interpolate(interpolate: bool) -> Self {
        if interpolate {
            SampleFilter::Bilinear
        } else {
            SampleFilter::Nearest
        }
    }
}

/// Sample the source at (x, y) into `out` (one pixel, `channels` bytes).
#[inline]
pub(crate) fn sample_into(
    image: &RasterImage,
    filter: SampleFilter,
    x: f64,
    y: f64,
    out: &mut [u8],
) {
    match filter {
        SampleFilter::Nearest => sample_nearest(image, x, y, out),
        SampleFilter::Bilinear => sample_bilinear(image, x, y, out),
    }
}

#[inline]
fn wrap_column(x: i64, width: u32) -> usize {
    x.rem_euclid(width as i64) as usize
}

#[inline]
fn clamp_row(y: i64, height: u32) -> usize {
    y.clamp(0, height as i64 - 1) as usize
}

#[inline]
fn pixel_slice(image: &RasterImage, px: usize, py: usize) -> &[u8] {
    let c = image.channels as usize;
    let idx = py * image.row_stride() + px * c;
    &image.pixels[idx..idx + c]
}

/// Nearest-neighbor sample: round to the nearest pixel centre.
fn sample_nearest(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) {
    let px = wrap_column(x.round() as i64, image.width);
    let py = clamp_row(y.round() as i64, image.height);
    out.copy_from_slice(pixel_slice(image, px, py));
}

/// Bilinear sample over the 4 nearest pixels.
///
/// The right-hand neighbour of the last column is column 0. Below row 0 and
/// past the last row the edge row is reused.
fn sample_bilinear(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) {
    let x_floor = x.floor();
    let y_floor = y.floor();

    let x0 = wrap_column(x_floor as i64, image.width);
    let x1 = wrap_column(x_floor as i64 + 1, image.width);
    let y0 = clamp_row(y_floor as i64, image.height);
    let y1 = clamp_row(y_floor as i64 + 1, image.height);

    // Fractional distances
    let fx = x - x_floor;
    let fy = (y - y_floor).clamp(0.0, 1.0);

    let p00 = pixel_slice(image, x0, y0);
    let p10 = pixel_slice(image, x1, y0);
    let p01 = pixel_slice(image, x0, y1);
    let p11 = pixel_slice(image, x1, y1);

    for (i, dst) in out.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *dst = v.clamp(0.0, 255.0).round() as u8;
    }
}
