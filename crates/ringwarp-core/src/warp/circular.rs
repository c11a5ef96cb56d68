//! Circular warp driver.
//!
//! Maps a rectangular source onto an annulus. Every output pixel is computed
//! on its own from the read-only source, so rows are rendered in independent
//! batches: in parallel with the `rayon` feature, sequentially otherwise.
//! Both paths run the same batch kernel and produce identical bytes.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace, warn};

use super::geometry::AnnulusMapping;
use super::sample::{sample_into, SampleFilter};
use super::types::{WarpError, WarpOptions, WarpParameters};
use crate::raster::RasterImage;

/// Output rows rendered between abort-flag checks.
const ROWS_PER_BATCH: usize = 16;

/// Warp an image onto an annulus.
///
/// Source columns are laid out around the circle (a full turn spans the
/// source width) and source rows run from `bottom_radius` to `top_radius`.
/// The canvas is a square of side `2 * ceil(max radius)` with the annulus
/// centred; pixels outside the annulus are transparent black.
///
/// # Errors
///
/// - [`WarpError::InvalidImage`] if the source has zero area or a bad buffer
/// - [`WarpError::InvalidParameters`] for unusable radii or start angle
/// - [`WarpError::AllocationFailure`] if the output cannot be allocated
///
/// # Example
///
/// ```ignore
/// use ringwarp_core::{circular_warp, RasterImage, WarpParameters};
///
/// let map = RasterImage::filled(360, 180, 4, [0, 0, 255, 255])?;
/// let params = WarpParameters::new(50.0, 200.0, 90.0, true, true);
/// let disc = circular_warp(&map, &params)?;
/// assert_eq!((disc.width, disc.height), (400, 400));
/// ```
pub fn circular_warp(
    source: &RasterImage,
    params: &WarpParameters,
) -> Result<RasterImage, WarpError> {
    circular_warp_with_options(source, params, &WarpOptions::default())
}

/// Warp an image onto an annulus with an explicit canvas and background.
///
/// With `options.output_size` set, the annulus is centred on that canvas and
/// may be clipped by it.
pub fn circular_warp_with_options(
    source: &RasterImage,
    params: &WarpParameters,
    options: &WarpOptions,
) -> Result<RasterImage, WarpError> {
    run_warp(source, params, options, None, cfg!(feature = "rayon"))
}

/// Warp an image onto an annulus, giving up when `abort` is raised.
///
/// The flag is checked once per batch of rows. A cancelled warp returns
/// [`WarpError::Cancelled`] and no image.
pub fn circular_warp_cancellable(
    source: &RasterImage,
    params: &WarpParameters,
    options: &WarpOptions,
    abort: &AtomicBool,
) -> Result<RasterImage, WarpError> {
    run_warp(source, params, options, Some(abort), cfg!(feature = "rayon"))
}

fn run_warp(
    source: &RasterImage,
    params: &WarpParameters,
    options: &WarpOptions,
    abort: Option<&AtomicBool>,
    parallel: bool,
) -> Result<RasterImage, WarpError> {
    source.validate()?;
    params.validate()?;
    options.validate()?;

    let (out_w, out_h) = AnnulusMapping::canvas_size(params, options);
    let channels = source.channels as usize;
    let mut output = allocate_output(out_w, out_h, channels)?;

    let mapping = AnnulusMapping::new(params, (out_w, out_h), source.width, source.height);
    let filter = SampleFilter::from_interpolate(params.interpolate);

    debug!(
        "circular warp {}x{}x{} -> {}x{}, radii {}..{}, start {} deg, clockwise {}, {:?}",
        source.width,
        source.height,
        channels,
        out_w,
        out_h,
        params.bottom_radius,
        params.top_radius,
        params.start_angle,
        params.clockwise,
        filter,
    );

    let job = RowJob {
        source,
        mapping,
        filter,
        background: &options.background[..channels],
        row_stride: out_w as usize * channels,
        abort,
    };

    let result = if parallel {
        job.render_parallel(&mut output)
    } else {
        job.render_sequential(&mut output)
    };

    if let Err(err) = result {
        warn!("circular warp stopped: {err}");
        return Err(err);
    }

    trace!("circular warp finished, {} bytes", output.len());

    Ok(RasterImage {
        width: out_w,
        height: out_h,
        channels: source.channels,
        pixels: output,
    })
}

/// Reserve the output buffer, reporting failure instead of aborting.
fn allocate_output(width: u32, height: u32, channels: usize) -> Result<Vec<u8>, WarpError> {
    let bytes = width as u128 * height as u128 * channels as u128;
    let len = usize::try_from(bytes)
        .ok()
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(WarpError::AllocationFailure { bytes })?;

    let mut output = Vec::new();
    output
        .try_reserve_exact(len)
        .map_err(|_| WarpError::AllocationFailure { bytes })?;
    output.resize(len, 0);
    Ok(output)
}

/// Everything a batch of rows needs; shared read-only between workers.
struct RowJob<'a> {
    source: &'a RasterImage,
    mapping: AnnulusMapping,
    filter: SampleFilter,
    background: &'a [u8],
    row_stride: usize,
    abort: Option<&'a AtomicBool>,
}

impl RowJob<'_> {
    fn render_sequential(&self, output: &mut [u8]) -> Result<(), WarpError> {
        output
            .chunks_mut(self.row_stride * ROWS_PER_BATCH)
            .enumerate()
            .try_for_each(|(batch, chunk)| self.render_batch(batch, chunk))
    }

    #[cfg(feature = "rayon")]
    fn render_parallel(&self, output: &mut [u8]) -> Result<(), WarpError> {
        use rayon::prelude::*;

        output
            .par_chunks_mut(self.row_stride * ROWS_PER_BATCH)
            .enumerate()
            .try_for_each(|(batch, chunk)| self.render_batch(batch, chunk))
    }

    #[cfg(not(feature = "rayon"))]
    fn render_parallel(&self, output: &mut [u8]) -> Result<(), WarpError> {
        self.render_sequential(output)
    }

    /// Render one batch of rows starting at row `batch * ROWS_PER_BATCH`.
    fn render_batch(&self, batch: usize, chunk: &mut [u8]) -> Result<(), WarpError> {
        if self
            .abort
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Err(WarpError::Cancelled);
        }

        let channels = self.background.len();
        let first_row = batch * ROWS_PER_BATCH;

        for (i, row) in chunk.chunks_exact_mut(self.row_stride).enumerate() {
            let py = (first_row + i) as u32;
            for (px, out) in row.chunks_exact_mut(channels).enumerate() {
                match self.mapping.source_position(px as u32, py) {
                    Some((x, y)) => sample_into(self.source, self.filter, x, y, out),
                    None => out.copy_from_slice(self.background),
                }
            }
        }

        Ok(())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating source dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=12)
    }

    /// Strategy for generating valid radii pairs.
    fn radii_strategy() -> impl Strategy<Value = (f64, f64)> {
        (0.0f64..=20.0, 0.5f64..=20.0)
    }

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) * 13 % 256) as u8;
                pixels.extend_from_slice(&[v, v / 2, 255 - v, 255]);
            }
        }
        RasterImage::new(width, height, 4, pixels).unwrap()
    }

    proptest! {
        /// Property: Output is the square bounding box of the outer radius.
        #[test]
        fn prop_output_dimensions(
            (width, height) in dimensions_strategy(),
            (bottom, top) in radii_strategy(),
        ) {
            let img = create_test_image(width, height);
            let params = WarpParameters::new(bottom, top, 0.0, true, false);
            let result = circular_warp(&img, &params).unwrap();

            let side = (2.0 * bottom.max(top).ceil()) as u32;
            prop_assert_eq!(result.width, side.max(1));
            prop_assert_eq!(result.height, side.max(1));
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 4) as usize);
        }

        /// Property: Pixels strictly outside the annulus are background.
        #[test]
        fn prop_outside_annulus_is_background(
            (width, height) in dimensions_strategy(),
            (bottom, top) in radii_strategy(),
            start in -720.0f64..=720.0,
            clockwise in any::<bool>(),
            interpolate in any::<bool>(),
        ) {
            let img = create_test_image(width, height);
            let params = WarpParameters::new(bottom, top, start, clockwise, interpolate);
            let options = WarpOptions::default().background([1, 2, 3, 4]);
            let result = circular_warp_with_options(&img, &params, &options).unwrap();

            let (inner, outer) = (params.inner_radius(), params.outer_radius());
            let cx = result.width as f64 / 2.0;
            let cy = result.height as f64 / 2.0;
            for py in 0..result.height {
                for px in 0..result.width {
                    let r = (px as f64 + 0.5 - cx).hypot(cy - (py as f64 + 0.5));
                    if r < inner || r > outer {
                        prop_assert_eq!(result.pixel(px, py).unwrap(), &[1u8, 2, 3, 4][..]);
                    }
                }
            }
        }

        /// Property: Nearest sampling only produces colors from the source.
        #[test]
        fn prop_nearest_copies_source_pixels(
            (width, height) in dimensions_strategy(),
            (bottom, top) in radii_strategy(),
            start in -360.0f64..=360.0,
        ) {
            let img = create_test_image(width, height);
            let params = WarpParameters::new(bottom, top, start, false, false);
            let result = circular_warp(&img, &params).unwrap();

            let palette: Vec<&[u8]> = img.pixels.chunks_exact(4).collect();
            for pixel in result.pixels.chunks_exact(4) {
                prop_assert!(
                    pixel == [0, 0, 0, 0] || palette.contains(&pixel),
                    "pixel {:?} not in source", pixel
                );
            }
        }

        /// Property: Adding a full turn to the start angle changes nothing.
        #[test]
        fn prop_start_angle_periodic(
            (width, height) in dimensions_strategy(),
            (bottom, top) in radii_strategy(),
            start in 0u32..360,
            turns in -2i32..=2,
            interpolate in any::<bool>(),
        ) {
            let img = create_test_image(width, height);
            let start = start as f64;
            let shifted = start + turns as f64 * 360.0;
            let a = circular_warp(&img, &WarpParameters::new(bottom, top, start, true, interpolate)).unwrap();
            let b = circular_warp(&img, &WarpParameters::new(bottom, top, shifted, true, interpolate)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
