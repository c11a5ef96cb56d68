//! Core raster image type.

use thiserror::Error;

/// Largest channel count a raster may carry (RGBA).
pub const MAX_CHANNELS: u8 = 4;

/// Errors raised when constructing a raster from raw parts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Channel count outside 1..=4
    #[error("Unsupported channel count: {0} (expected 1 to 4)")]
    UnsupportedChannels(u8),

    /// width * height * channels overflows the address space
    #[error("Image too large: {width}x{height} with {channels} channels")]
    TooLarge { width: u32, height: u32, channels: u8 },

    /// Pixel data length doesn't match width * height * channels
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// An owned 8-bit raster image with interleaved channels.
///
/// Pixels are stored row-major, top row first. The channel count decides
/// the layout: 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Interleaved channels per pixel.
    pub channels: u8,
    /// Pixel data, `width * height * channels` bytes.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a raster from raw parts, validating the buffer layout.
    ///
    /// # Errors
    ///
    /// Returns a [`RasterError`] if a dimension is zero, the channel count is
    /// not in 1..=4, or the buffer length does not match.
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self, RasterError> {
        check_layout(width, height, channels, pixels.len())?;
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Create a raster where every pixel holds `value`.
    ///
    /// Only the first `channels` components of `value` are used.
    pub fn filled(width: u32, height: u32, channels: u8, value: [u8; 4]) -> Result<Self, RasterError> {
        let len = expected_len(width, height, channels)?;
        let pixels = value[..channels as usize].repeat(len / channels as usize);
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Check the buffer layout without consuming the image.
    ///
    /// Fields are public, so an image built by hand may be inconsistent.
    pub fn validate(&self) -> Result<(), RasterError> {
        check_layout(self.width, self.height, self.channels, self.pixels.len())
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Get the channel values of the pixel at (x, y), if in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels as usize;
        let idx = y as usize * self.row_stride() + x as usize * c;
        self.pixels.get(idx..idx + c)
    }

}

/// Byte length of a `width` x `height` raster, or an error when the
/// dimensions are unusable or the length exceeds `isize::MAX`.
fn expected_len(width: u32, height: u32, channels: u8) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(RasterError::UnsupportedChannels(channels));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(RasterError::TooLarge {
            width,
            height,
            channels,
        })
}

fn check_layout(width: u32, height: u32, channels: u8, actual: usize) -> Result<(), RasterError> {
    let expected = expected_len(width, height, channels)?;
    if actual != expected {
        return Err(RasterError::InvalidPixelData { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let img = RasterImage::new(100, 50, 4, vec![0u8; 100 * 50 * 4]).unwrap();

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.channels, 4);
        assert_eq!(img.pixels.len(), 20000);
        assert_eq!(img.row_stride(), 400);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = RasterImage::new(0, 10, 3, vec![]).unwrap_err();
        assert_eq!(
            err,
            RasterError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_channel_count_rejected() {
        assert_eq!(
            RasterImage::new(1, 1, 0, vec![]).unwrap_err(),
            RasterError::UnsupportedChannels(0)
        );
        assert_eq!(
            RasterImage::new(1, 1, 5, vec![0; 5]).unwrap_err(),
            RasterError::UnsupportedChannels(5)
        );
    }

    #[test]
    fn test_buffer_length_rejected() {
        let err = RasterImage::new(2, 2, 3, vec![0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            RasterError::InvalidPixelData {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(3, 2, 3, [10, 20, 30, 40]).unwrap();
        assert_eq!(img.pixels.len(), 18);
        for chunk in img.pixels.chunks_exact(3) {
            assert_eq!(chunk, &[10, 20, 30]);
        }
    }

    #[test]
    fn test_pixel_access() {
        let pixels: Vec<u8> = (0..12).collect();
        let img = RasterImage::new(2, 2, 3, pixels).unwrap();

        assert_eq!(img.pixel(0, 0), Some(&[0u8, 1, 2][..]));
        assert_eq!(img.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn test_validate_hand_built_image() {
        let mut img = RasterImage::filled(4, 4, 1, [7, 0, 0, 0]).unwrap();
        assert!(img.validate().is_ok());

        img.pixels.pop();
        assert!(matches!(
            img.validate(),
            Err(RasterError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let img = RasterImage {
            width: 1 << 31,
            height: 1 << 31,
            channels: 4,
            pixels: vec![],
        };
        assert_eq!(
            img.validate(),
            Err(RasterError::TooLarge {
                width: 1 << 31,
                height: 1 << 31,
                channels: 4
            })
        );
        assert!(matches!(
            RasterImage::new(u32::MAX, u32::MAX, 4, vec![]),
            Err(RasterError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_filled_overflow_is_error() {
        assert!(matches!(
            RasterImage::filled(u32::MAX, u32::MAX, 4, [0; 4]),
            Err(RasterError::TooLarge { .. })
        ));
        assert_eq!(
            RasterImage::filled(0, 3, 1, [0; 4]).unwrap_err(),
            RasterError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::UnsupportedChannels(7);
        assert_eq!(err.to_string(), "Unsupported channel count: 7 (expected 1 to 4)");
    }
}
