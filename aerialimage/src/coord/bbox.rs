//! Geographic bounding boxes.

use super::types::{CoordError, GeoPoint};
use super::{geo_to_pixel, PixelRect};
use std::f64::consts::PI;

/// Earth radius used by the meter-to-degree approximation, in kilometers.
const SHIFT_EARTH_RADIUS_KM: f64 = 6378.137;

/// A geographic rectangle in canonical form.
///
/// `top_left` is the north-west corner and `bottom_right` the south-east
/// corner, so `top_left.latitude > bottom_right.latitude` and
/// `top_left.longitude < bottom_right.longitude` always hold. Both corners
/// are clamped to the Web Mercator range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    top_left: GeoPoint,
    bottom_right: GeoPoint,
}

impl BoundingBox {
    /// Builds the canonical box spanned by two diagonal corners.
    ///
    /// The corners may arrive in any diagonal order. Fails when the points
    /// share a latitude or a longitude (after clamping), since such a box
    /// has no area.
    pub fn normalize(a: GeoPoint, b: GeoPoint) -> Result<Self, CoordError> {
        let a = a.ensure_finite()?.clamped();
        let b = b.ensure_finite()?.clamped();

        if a.latitude == b.latitude {
            return Err(CoordError::DegenerateBox(format!(
                "corners {} and {} share the same latitude",
                a, b
            )));
        }
        if a.longitude == b.longitude {
            return Err(CoordError::DegenerateBox(format!(
                "corners {} and {} share the same longitude",
                a, b
            )));
        }

        Ok(Self {
            top_left: GeoPoint::new(
                a.latitude.max(b.latitude),
                a.longitude.min(b.longitude),
            ),
            bottom_right: GeoPoint::new(
                a.latitude.min(b.latitude),
                a.longitude.max(b.longitude),
            ),
        })
    }

    /// Builds a box from two diagonal `(lat, lon)` corners.
    pub fn from_corners(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<Self, CoordError> {
        Self::normalize(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2))
    }

    /// Builds a box centered on a point with an extent given in **degrees**.
    ///
    /// `width` spans longitude and `height` spans latitude. The extent is not
    /// converted from meters; use [`BoundingBox::around_center_meters`] for
    /// a metric extent.
    pub fn around_center(
        latitude: f64,
        longitude: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, CoordError> {
        ensure_positive_extent(width, height)?;
        Self::normalize(
            GeoPoint::new(latitude + height / 2.0, longitude - width / 2.0),
            GeoPoint::new(latitude - height / 2.0, longitude + width / 2.0),
        )
    }

    /// Builds a box centered on a point with an extent given in meters.
    ///
    /// Uses a spherical approximation that is only accurate for small
    /// extents away from the poles.
    pub fn around_center_meters(
        latitude: f64,
        longitude: f64,
        width_m: f64,
        height_m: f64,
    ) -> Result<Self, CoordError> {
        ensure_positive_extent(width_m, height_m)?;
        let top_left = coordinate_shift(latitude, longitude, height_m / 2.0, -width_m / 2.0);
        let bottom_right = coordinate_shift(latitude, longitude, -height_m / 2.0, width_m / 2.0);
        Self::normalize(top_left, bottom_right)
    }

    /// North-west corner.
    pub fn top_left(&self) -> GeoPoint {
        self.top_left
    }

    /// South-east corner.
    pub fn bottom_right(&self) -> GeoPoint {
        self.bottom_right
    }

    /// Longitude span in degrees.
    pub fn width_degrees(&self) -> f64 {
        self.bottom_right.longitude - self.top_left.longitude
    }

    /// Latitude span in degrees.
    pub fn height_degrees(&self) -> f64 {
        self.top_left.latitude - self.bottom_right.latitude
    }

    /// Pixel-space rectangle of this box at `zoom`.
    pub fn pixel_rect(&self, zoom: u8) -> PixelRect {
        let top_left = geo_to_pixel(self.top_left, zoom);
        let bottom_right = geo_to_pixel(self.bottom_right, zoom);
        PixelRect {
            left: top_left.x,
            top: top_left.y,
            right: bottom_right.x,
            bottom: bottom_right.y,
        }
    }
}

fn ensure_positive_extent(width: f64, height: f64) -> Result<(), CoordError> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(CoordError::DegenerateBox(format!(
            "extent {} x {} must be positive",
            width, height
        )));
    }
    Ok(())
}

/// Shifts a coordinate by a distance in meters (positive = north / east).
///
/// The longitude offset is scaled by `1 / cos(latitude)` of the start point.
pub fn coordinate_shift(
    latitude: f64,
    longitude: f64,
    lat_shift_m: f64,
    lon_shift_m: f64,
) -> GeoPoint {
    let meter = (1.0 / ((2.0 * PI / 360.0) * SHIFT_EARTH_RADIUS_KM)) / 1000.0;
    GeoPoint::new(
        latitude + lat_shift_m * meter,
        longitude + (lon_shift_m * meter) / (latitude * (PI / 180.0)).cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{MAX_LAT, MIN_LAT};

    fn navy_pier() -> (GeoPoint, GeoPoint) {
        (
            GeoPoint::new(41.893812, -87.615195),
            GeoPoint::new(41.885108, -87.597778),
        )
    }

    #[test]
    fn test_normalize_canonical_order() {
        let (a, b) = navy_pier();
        let bbox = BoundingBox::normalize(a, b).unwrap();

        assert_eq!(bbox.top_left(), GeoPoint::new(41.893812, -87.615195));
        assert_eq!(bbox.bottom_right(), GeoPoint::new(41.885108, -87.597778));
    }

    #[test]
    fn test_normalize_is_order_independent() {
        let (a, b) = navy_pier();
        assert_eq!(
            BoundingBox::normalize(a, b).unwrap(),
            BoundingBox::normalize(b, a).unwrap()
        );
    }

    #[test]
    fn test_normalize_accepts_other_diagonal() {
        // Bottom-left and top-right corners describe the same box
        let (a, b) = navy_pier();
        let bottom_left = GeoPoint::new(b.latitude, a.longitude);
        let top_right = GeoPoint::new(a.latitude, b.longitude);

        assert_eq!(
            BoundingBox::normalize(bottom_left, top_right).unwrap(),
            BoundingBox::normalize(a, b).unwrap()
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let (a, b) = navy_pier();
        let once = BoundingBox::normalize(a, b).unwrap();
        let twice = BoundingBox::normalize(once.top_left(), once.bottom_right()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_rejects_identical_points() {
        let p = GeoPoint::new(10.0, 20.0);
        assert!(matches!(
            BoundingBox::normalize(p, p),
            Err(CoordError::DegenerateBox(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_same_latitude() {
        let result = BoundingBox::from_corners(10.0, 20.0, 10.0, 21.0);
        assert!(matches!(result, Err(CoordError::DegenerateBox(_))));
    }

    #[test]
    fn test_normalize_rejects_same_longitude() {
        let result = BoundingBox::from_corners(10.0, 20.0, 11.0, 20.0);
        assert!(matches!(result, Err(CoordError::DegenerateBox(_))));
    }

    #[test]
    fn test_normalize_rejects_box_collapsed_by_clamping() {
        // Both latitudes lie beyond the Mercator limit and clamp to the same value
        let result = BoundingBox::from_corners(88.0, 0.0, 89.0, 10.0);
        assert!(matches!(result, Err(CoordError::DegenerateBox(_))));
    }

    #[test]
    fn test_normalize_clamps_latitude() {
        let bbox = BoundingBox::from_corners(90.0, -10.0, -90.0, 10.0).unwrap();
        assert_eq!(bbox.top_left().latitude, MAX_LAT);
        assert_eq!(bbox.bottom_right().latitude, MIN_LAT);
    }

    #[test]
    fn test_normalize_rejects_nan() {
        let result = BoundingBox::from_corners(f64::NAN, 0.0, 1.0, 1.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_around_center_uses_degrees() {
        let bbox = BoundingBox::around_center(41.88, -87.62, 0.2, 0.1).unwrap();

        assert!((bbox.width_degrees() - 0.2).abs() < 1e-9);
        assert!((bbox.height_degrees() - 0.1).abs() < 1e-9);
        assert!((bbox.top_left().latitude - 41.93).abs() < 1e-9);
        assert!((bbox.top_left().longitude - (-87.72)).abs() < 1e-9);
    }

    #[test]
    fn test_around_center_rejects_zero_extent() {
        assert!(BoundingBox::around_center(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::around_center(0.0, 0.0, 1.0, -1.0).is_err());
    }

    #[test]
    fn test_around_center_meters() {
        // 1 km of latitude is roughly 0.009 degrees
        let bbox = BoundingBox::around_center_meters(0.0, 0.0, 1000.0, 1000.0).unwrap();
        assert!((bbox.height_degrees() - 0.008983).abs() < 1e-5);
        assert!((bbox.width_degrees() - 0.008983).abs() < 1e-5);

        // At 60° a kilometer of longitude spans twice as many degrees
        let bbox = BoundingBox::around_center_meters(60.0, 0.0, 1000.0, 1000.0).unwrap();
        assert!((bbox.width_degrees() - 2.0 * 0.008983).abs() < 1e-4);
    }

    #[test]
    fn test_coordinate_shift_north() {
        let shifted = coordinate_shift(0.0, 0.0, 111_319.49, 0.0);
        assert!((shifted.latitude - 1.0).abs() < 1e-4);
        assert_eq!(shifted.longitude, 0.0);
    }

    #[test]
    fn test_pixel_rect_is_ordered() {
        let (a, b) = navy_pier();
        let rect = BoundingBox::normalize(b, a).unwrap().pixel_rect(17);
        assert!(rect.left < rect.right);
        assert!(rect.top < rect.bottom);
    }
}
