//! Horizontal shift with wraparound.
//!
//! Rotating an equirectangular map about its pole is a horizontal shift:
//! columns that fall off one edge come back on the other. Shifting the
//! source by `n` columns and warping is equivalent to advancing the warp's
//! start angle by `n / W` of a full turn in the traversal direction.

use crate::raster::RasterImage;

/// Shift every row of an image horizontally, wrapping at the edges.
///
/// # Arguments
///
/// * `image` - Source image
/// * `amount` - Columns to move the content; positive moves it right,
///   negative left. Taken modulo the image width.
///
/// # Returns
///
/// A new `RasterImage` with the same dimensions. A zero (or whole-width)
/// shift returns a copy.
///
/// # Example
///
/// ```
/// use ringwarp_core::{horizontal_shift, RasterImage};
///
/// let img = RasterImage::new(3, 1, 1, vec![1, 2, 3]).unwrap();
/// assert_eq!(horizontal_shift(&img, 1).pixels, vec![3, 1, 2]);
/// assert_eq!(horizontal_shift(&img, -1).pixels, vec![2, 3, 1]);
/// ```
pub fn horizontal_shift(image: &RasterImage, amount: i64) -> RasterImage {
    if image.width == 0 {
        return image.clone();
    }

    let shift = amount.rem_euclid(image.width as i64) as usize;
    if shift == 0 {
        return image.clone();
    }

    let mut output = image.clone();
    let stride = image.row_stride();
    let offset = shift * image.channels as usize;

    // Rotating each row right by `shift` pixels
    for row in output.pixels.chunks_exact_mut(stride) {
        row.rotate_right(offset);
    }

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
