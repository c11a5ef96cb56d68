//! Parameter and error types for the circular warp.

use crate::raster::RasterError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for warp operations.
///
/// None of these are transient: the caller has to change its input before
/// trying again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WarpError {
    /// The source image has zero area or an inconsistent buffer.
    #[error("Invalid source image: {0}")]
    InvalidImage(#[from] RasterError),

    /// Radii, start angle or output size are unusable.
    #[error("Invalid warp parameters: {0}")]
    InvalidParameters(String),

    /// The output raster could not be allocated.
    #[error("Cannot allocate {bytes} byte output raster")]
    AllocationFailure { bytes: u128 },

    /// The caller raised the abort flag before the warp finished.
    #[error("Warp cancelled")]
    Cancelled,
}

/// Geometry and sampling controls for [`circular_warp`](super::circular_warp).
///
/// # Coordinate System
///
/// - Angles are in degrees, 0 = 3 o'clock, positive = counter-clockwise
/// - `start_angle` is the on-screen angle at which source column 0 lands
/// - Source row 0 lands on `bottom_radius`, the last row on `top_radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarpParameters {
    /// Radius (in output pixels) that receives source row 0
    pub bottom_radius: f64,
    /// Radius (in output pixels) that receives the last source row
    pub top_radius: f64,
    /// Angle of source column 0 in degrees
    pub start_angle: f64,
    /// Lay the source columns out clockwise on screen
    pub clockwise: bool,
    /// Bilinear sampling instead of nearest neighbor
    pub interpolate: bool,
}

impl Default for WarpParameters {
    fn default() -> Self {
        Self {
            bottom_radius: 0.0,
            top_radius: 1.0,
            start_angle: 0.0,
            clockwise: true,
            interpolate: true,
        }
    }
}

impl WarpParameters {
    /// Create a new parameter set.
    pub fn new(
        bottom_radius: f64,
        top_radius: f64,
        start_angle: f64,
        clockwise: bool,
        interpolate: bool,
    ) -> Self {
        Self {
            bottom_radius,
            top_radius,
            start_angle,
            clockwise,
            interpolate,
        }
    }

    /// Full disc filling radii 0 to `radius`, column 0 at 3 o'clock.
    pub fn disc(radius: f64) -> Self {
        Self {
            top_radius: radius,
            ..Self::default()
        }
    }

    /// Smaller of the two radii.
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.bottom_radius.min(self.top_radius)
    }

    /// Larger of the two radii.
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.bottom_radius.max(self.top_radius)
    }

    /// Check the radii and start angle.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidParameters`] if a radius is negative or
    /// not finite, both radii are zero, or the start angle is not finite.
    pub fn validate(&self) -> Result<(), WarpError> {
        for (name, value) in [
            ("bottom radius", self.bottom_radius),
            ("top radius", self.top_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WarpError::InvalidParameters(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.bottom_radius == 0.0 && self.top_radius == 0.0 {
            return Err(WarpError::InvalidParameters(
                "bottom and top radius are both zero".to_string(),
            ));
        }
        if !self.start_angle.is_finite() {
            return Err(WarpError::InvalidParameters(format!(
                "start angle must be finite, got {}",
                self.start_angle
            )));
        }
        Ok(())
    }
}

/// Explicit output canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Canvas and fill controls that rarely change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarpOptions {
    /// Canvas size override. `None` uses the square bounding box of the
    /// outer radius.
    pub output_size: Option<OutputSize>,
    /// Value written outside the annulus. Only the first `channels`
    /// components are used; the default is transparent black.
    pub background: [u8; 4],
}

impl WarpOptions {
    /// Options with a fixed canvas size.
    pub fn with_output_size(width: u32, height: u32) -> Self {
        Self {
            output_size: Some(OutputSize::new(width, height)),
            ..Self::default()
        }
    }

    /// Replace the background value.
    pub fn background(mut self, background: [u8; 4]) -> Self {
        self.background = background;
        self
    }

    /// Check the output size override.
    pub fn validate(&self) -> Result<(), WarpError> {
        match self.output_size {
            Some(size) if size.width == 0 || size.height == 0 => {
                Err(WarpError::InvalidParameters(format!(
                    "output size must be non-zero, got {}x{}",
                    size.width, size.height
                )))
            }
            _ => Ok(()),
        }
    }
}
