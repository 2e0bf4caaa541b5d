//! Retrieval request forms.

use crate::coord::BoundingBox;
use crate::error::RetrievalError;

/// The area to retrieve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetrievalRequest {
    /// Two diagonal corners, in either order.
    Corners {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    /// A center point and an extent in **degrees**.
    ///
    /// `width` spans longitude and `height` spans latitude. These are not
    /// meters; use [`RetrievalRequest::CenteredMeters`] for a metric extent.
    Centered {
        latitude: f64,
        longitude: f64,
        width: f64,
        height: f64,
    },
    /// A center point and an extent in meters.
    CenteredMeters {
        latitude: f64,
        longitude: f64,
        width_m: f64,
        height_m: f64,
    },
}

impl RetrievalRequest {
    /// Normalized bounding box of the requested area.
    pub fn bounding_box(&self) -> Result<BoundingBox, RetrievalError> {
        let bbox = match *self {
            RetrievalRequest::Corners {
                lat1,
                lon1,
                lat2,
                lon2,
            } => BoundingBox::from_corners(lat1, lon1, lat2, lon2)?,
            RetrievalRequest::Centered {
                latitude,
                longitude,
                width,
                height,
            } => BoundingBox::around_center(latitude, longitude, width, height)?,
            RetrievalRequest::CenteredMeters {
                latitude,
                longitude,
                width_m,
                height_m,
            } => BoundingBox::around_center_meters(latitude, longitude, width_m, height_m)?,
        };
        Ok(bbox)
    }
}
