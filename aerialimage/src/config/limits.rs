//! Output size limits used by the resolution selector.

use super::defaults::DEFAULT_MAX_PIXEL_AREA;
use crate::coord::PixelRect;

/// Bytes per pixel of the uncompressed RGB output.
pub const BYTES_PER_PIXEL: u64 = 3;

/// Ceiling on the size of a retrieved image.
///
/// A zoom level is usable when the cropped image fits the pixel budget and,
/// if one is set, the uncompressed byte budget.
///
/// ```
/// use aerialimage::config::OutputLimits;
///
/// let limits = OutputLimits::default();
/// assert_eq!(limits.max_pixel_area(), 8192 * 8192);
/// assert_eq!(limits.max_bytes(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimits {
    max_pixel_area: u64,
    max_bytes: Option<u64>,
}

impl OutputLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of output pixels.
    pub fn with_max_pixel_area(mut self, area: u64) -> Self {
        self.max_pixel_area = area;
        self
    }

    /// Set an uncompressed byte budget (3 bytes per pixel).
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = Some(bytes);
        self
    }

    pub fn max_pixel_area(&self) -> u64 {
        self.max_pixel_area
    }

    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Whether an image covering `rect` stays within both budgets.
    pub fn permits(&self, rect: &PixelRect) -> bool {
        let area = rect.area();
        if area > self.max_pixel_area {
            return false;
        }
        match self.max_bytes {
            Some(bytes) => area.saturating_mul(BYTES_PER_PIXEL) <= bytes,
            None => true,
        }
    }
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            max_pixel_area: DEFAULT_MAX_PIXEL_AREA,
            max_bytes: None,
        }
    }
}
