//=========================================================================
// Coordinate Mapper
//=========================================================================
//
// Converts between pixel space and normalized image space [0,1]x[0,1].
//
// Pixel inputs are clamped to the image rectangle before dividing, so
// normalized outputs always stay inside [0,1].
//
//=========================================================================

/// Pixel <-> normalized coordinate conversion for a fixed image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    /// Creates a mapper for an image of `width` x `height` pixels.
    ///
    /// Dimensions are expected to be positive; [`SimConfig::validate`]
    /// guarantees this for configured simulators.
    ///
    /// [`SimConfig::validate`]: crate::core::config::SimConfig::validate
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Scales a normalized point (or size) up to pixels.
    pub fn to_pixels(&self, normalized: [f64; 2]) -> [f64; 2] {
        [normalized[0] * self.width, normalized[1] * self.height]
    }

    /// Clamps a pixel point (or size) to the image and normalizes it.
    pub fn from_pixels(&self, pixel: [f64; 2]) -> [f64; 2] {
        let x = pixel[0].clamp(0.0, self.width);
        let y = pixel[1].clamp(0.0, self.height);
        [x / self.width, y / self.height]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
