//! Conversions between [`RasterImage`] and the `image` crate buffers.
//!
//! Decoding and encoding stay with the caller; these helpers only move pixel
//! buffers across so a decoded `image::DynamicImage` can be warped directly.

use super::RasterImage;
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

impl RasterImage {
    /// Create a raster from an `image::RgbaImage` without copying.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: 4,
            pixels: img.into_raw(),
        }
    }

    /// Create a raster from an `image::RgbImage` without copying.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: 3,
            pixels: img.into_raw(),
        }
    }

    /// Create a single-channel raster from an `image::GrayImage`.
    pub fn from_gray_image(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: 1,
            pixels: img.into_raw(),
        }
    }

    /// Create a two-channel raster from an `image::GrayAlphaImage`.
    pub fn from_gray_alpha_image(img: GrayAlphaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: 2,
            pixels: img.into_raw(),
        }
    }

    /// Create a raster from any decoded image.
    ///
    /// 8-bit layouts are taken as-is. Anything else (16-bit, float) is
    /// converted to RGBA8 when it has alpha and RGB8 otherwise.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(buf) => Self::from_gray_image(buf),
            DynamicImage::ImageLumaA8(buf) => Self::from_gray_alpha_image(buf),
            DynamicImage::ImageRgb8(buf) => Self::from_rgb_image(buf),
            DynamicImage::ImageRgba8(buf) => Self::from_rgba_image(buf),
            other if other.color().has_alpha() => Self::from_rgba_image(other.to_rgba8()),
            other => Self::from_rgb_image(other.to_rgb8()),
        }
    }

    /// Convert to an `image::RgbaImage`, expanding gray and RGB layouts.
    ///
    /// Missing alpha becomes fully opaque. Returns `None` if the buffer does
    /// not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        if self.validate().is_err() {
            return None;
        }

        let rgba = match self.channels {
            4 => self.pixels.clone(),
            3 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            2 => self
                .pixels
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            _ => self.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        };

        RgbaImage::from_raw(self.width, self.height, rgba)
    }

    /// Convert into a `DynamicImage` with a matching 8-bit layout.
    pub fn into_dynamic(self) -> Option<DynamicImage> {
        let (w, h) = (self.width, self.height);
        match self.channels {
            1 => GrayImage::from_raw(w, h, self.pixels).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(w, h, self.pixels).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(w, h, self.pixels).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(w, h, self.pixels).map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }
}
