//! WASM bindings for the circular warp.
//!
//! This is the boundary a host UI calls to turn a rectangular image (a
//! world map, a rendered view) into a ring or disc for display.

use crate::types::JsRasterImage;
use ringwarp_core::{
    circular_warp as core_warp, circular_warp_with_options as core_warp_with_options,
    horizontal_shift as core_shift, WarpError, WarpOptions, WarpParameters,
};
use wasm_bindgen::prelude::*;

/// Convert a core error into a JS error value, reporting it on the console.
fn to_js_error(err: WarpError) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Warp an image onto an annulus.
///
/// # Arguments
///
/// * `image` - Source image (any channel count 1-4)
/// * `bottom_radius` - Radius receiving the first source row
/// * `top_radius` - Radius receiving the last source row
/// * `start_angle` - Angle of source column 0 in degrees (0 = 3 o'clock, counter-clockwise)
/// * `clockwise` - Lay source columns out clockwise
/// * `interpolate` - Bilinear sampling instead of nearest neighbor
///
/// # Returns
///
/// A square image of side `2 * ceil(max radius)`, transparent outside the ring.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const disc = circular_warp(map, 0, 256, 90, true, true);
/// ctx.putImageData(new ImageData(disc.pixels_clamped(), disc.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn circular_warp(
    image: &JsRasterImage,
    bottom_radius: f64,
    top_radius: f64,
    start_angle: f64,
    clockwise: bool,
    interpolate: bool,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster();
    let params = WarpParameters::new(bottom_radius, top_radius, start_angle, clockwise, interpolate);

    core_warp(&src, &params)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Warp an image using serialized parameters and options.
///
/// # Arguments
///
/// * `image` - Source image
/// * `params` - `{ bottomRadius, topRadius, startAngle, clockwise, interpolate }`;
///   missing fields take their defaults
/// * `options` - `{ outputSize: { width, height }, background: [r, g, b, a] }`,
///   or `undefined` for the defaults
#[wasm_bindgen]
pub fn circular_warp_with_options(
    image: &JsRasterImage,
    params: JsValue,
    options: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let params: WarpParameters = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid warp parameters: {}", e)))?;
    let options: WarpOptions = if options.is_undefined() || options.is_null() {
        WarpOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid warp options: {}", e)))?
    };

    let src = image.to_raster();
    core_warp_with_options(&src, &params, &options)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Shift an image horizontally with wraparound.
///
/// Positive `amount` moves content right. Used to rotate a map about its
/// pole before warping.
#[wasm_bindgen]
pub fn horizontal_shift(image: &JsRasterImage, amount: i32) -> JsRasterImage {
    let src = image.to_raster();
    JsRasterImage::from_raster(core_shift(&src, amount as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 RGBA: row 0 red, row 1 blue.
    fn red_blue_image() -> JsRasterImage {
        let mut pixels = Vec::new();
        for _ in 0..4 {
            pixels.extend_from_slice(&[255, 0, 0, 255]);
        }
        for _ in 0..4 {
            pixels.extend_from_slice(&[0, 0, 255, 255]);
        }
        JsRasterImage::new(4, 2, 4, pixels)
    }

    #[test]
    fn test_warp_dimensions() {
        let result = circular_warp(&red_blue_image(), 10.0, 20.0, 0.0, true, false)
            .unwrap_or_else(|_| panic!("warp failed"));
        assert_eq!(result.width(), 40);
        assert_eq!(result.height(), 40);
        assert_eq!(result.channels(), 4);
        assert_eq!(result.byte_length(), 40 * 40 * 4);
    }

    #[test]
    fn test_warp_inner_red_outer_blue() {
        let result = circular_warp(&red_blue_image(), 10.0, 20.0, 0.0, true, false)
            .unwrap_or_else(|_| panic!("warp failed"));
        let pixels = result.pixels();
        let at = |x: usize, y: usize| &pixels[(y * 40 + x) * 4..(y * 40 + x) * 4 + 4];

        assert_eq!(at(30, 19), &[255, 0, 0, 255]);
        assert_eq!(at(39, 19), &[0, 0, 255, 255]);
        assert_eq!(at(20, 20), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_shift() {
        let img = JsRasterImage::new(3, 1, 1, vec![1, 2, 3]);
        assert_eq!(horizontal_shift(&img, 1).pixels(), vec![3, 1, 2]);
        assert_eq!(horizontal_shift(&img, -1).pixels(), vec![2, 3, 1]);
    }
}
