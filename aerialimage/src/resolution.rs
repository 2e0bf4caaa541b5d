//! Zoom level selection.
//!
//! Picks the most detailed zoom at which a bounding box still fits the
//! caller's [`OutputLimits`].

use crate::config::OutputLimits;
use crate::coord::{BoundingBox, MAX_ZOOM, MIN_ZOOM};
use crate::error::RetrievalError;

/// Returns the highest zoom level whose cropped image fits `limits`.
///
/// Zoom levels are scanned from the most detailed down. Pixel area grows
/// roughly fourfold per level, so the first level that fits is the answer.
///
/// # Errors
///
/// [`RetrievalError::ImageTooLarge`] when even zoom 1 exceeds the limits.
/// The world at zoom 1 is 512×512 pixels, so this only happens with
/// caller-supplied limits smaller than that.
///
/// # Example
///
/// ```
/// use aerialimage::config::OutputLimits;
/// use aerialimage::coord::BoundingBox;
/// use aerialimage::resolution::select_zoom;
///
/// let navy_pier = BoundingBox::from_corners(41.893812, -87.615195, 41.885108, -87.597778).unwrap();
/// assert_eq!(select_zoom(&navy_pier, &OutputLimits::default()).unwrap(), 19);
/// ```
pub fn select_zoom(bbox: &BoundingBox, limits: &OutputLimits) -> Result<u8, RetrievalError> {
    for zoom in (MIN_ZOOM..=MAX_ZOOM).rev() {
        let rect = bbox.pixel_rect(zoom);
        if limits.permits(&rect) {
            tracing::debug!(
                zoom,
                width = rect.width(),
                height = rect.height(),
                "Selected zoom level"
            );
            return Ok(zoom);
        }
    }

    Err(RetrievalError::ImageTooLarge {
        max_pixel_area: limits.max_pixel_area(),
    })
}
