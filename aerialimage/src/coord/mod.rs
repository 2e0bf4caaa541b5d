//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude),
//! whole-map pixel coordinates, tile coordinates and quadkeys in the Bing
//! tile system. Everything here is a pure function.
//!
//! Reference: <https://msdn.microsoft.com/en-us/library/bb259689.aspx>

mod bbox;
mod grid;
mod types;

pub use bbox::{coordinate_shift, BoundingBox};
pub use grid::{PixelRect, TileGrid, TileGridIterator};
pub use types::{
    CoordError, GeoPoint, PixelPoint, QuadKey, TileCoord, EARTH_RADIUS_METERS, MAX_LAT, MAX_LON,
    MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM, TILE_SIZE,
};

use std::f64::consts::PI;

/// Clips a number to the `[min, max]` range.
#[inline]
pub fn clip(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Returns an error unless `zoom` is a supported level of detail.
pub fn validate_zoom(zoom: u8) -> Result<u8, CoordError> {
    if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(CoordError::InvalidZoom(zoom))
    }
}

/// Width and height of the whole map in pixels at `zoom`.
#[inline]
pub fn map_size(zoom: u8) -> u64 {
    (TILE_SIZE as u64) << zoom
}

/// Ground resolution in meters per pixel at the given latitude and zoom.
pub fn ground_resolution(lat: f64, zoom: u8) -> f64 {
    let lat = clip(lat, MIN_LAT, MAX_LAT);
    (lat * PI / 180.0).cos() * 2.0 * PI * EARTH_RADIUS_METERS / map_size(zoom) as f64
}

/// Map scale at the given latitude, zoom and screen resolution, expressed as
/// the denominator N of the ratio 1:N.
pub fn map_scale(lat: f64, zoom: u8, screen_dpi: u32) -> f64 {
    ground_resolution(lat, zoom) * screen_dpi as f64 / 0.0254
}

/// Projects a geographic point to pixel coordinates at `zoom`.
///
/// Latitude is clamped to ±85.05112878° and longitude to ±180° first;
/// the projection is undefined beyond those limits.
pub fn geo_to_pixel(point: GeoPoint, zoom: u8) -> PixelPoint {
    let point = point.clamped();

    let x = (point.longitude + 180.0) / 360.0;
    let sin_lat = (point.latitude * PI / 180.0).sin();
    let y = 0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI);

    let size = map_size(zoom) as f64;
    PixelPoint {
        x: clip(x * size + 0.5, 0.0, size - 1.0).floor() as u32,
        y: clip(y * size + 0.5, 0.0, size - 1.0).floor() as u32,
    }
}

/// Converts pixel coordinates at `zoom` back to a geographic point.
pub fn pixel_to_geo(pixel: PixelPoint, zoom: u8) -> GeoPoint {
    let size = map_size(zoom) as f64;
    let x = clip(pixel.x as f64, 0.0, size - 1.0) / size - 0.5;
    let y = 0.5 - clip(pixel.y as f64, 0.0, size - 1.0) / size;

    GeoPoint {
        latitude: 90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI,
        longitude: 360.0 * x,
    }
}

/// Returns `(col, row)` of the tile containing the pixel.
#[inline]
pub fn pixel_to_tile(pixel: PixelPoint) -> (u32, u32) {
    (pixel.x / TILE_SIZE, pixel.y / TILE_SIZE)
}

/// Returns the upper-left pixel of the tile at `(col, row)`.
#[inline]
pub fn tile_to_pixel(col: u32, row: u32) -> PixelPoint {
    PixelPoint {
        x: col * TILE_SIZE,
        y: row * TILE_SIZE,
    }
}

/// Clamps a tile coordinate to `[0, 2^zoom - 1]`.
pub fn clamp_tile_coordinate(value: i64, zoom: u8) -> u32 {
    let max = (1_i64 << zoom) - 1;
    value.clamp(0, max) as u32
}

/// Encodes tile coordinates as a quadkey.
///
/// One base-4 digit per level, most significant first; each digit is
/// `2 * row_bit + col_bit`.
pub fn tile_to_quadkey(tile: &TileCoord) -> QuadKey {
    let mut digits = String::with_capacity(tile.zoom as usize);
    for level in (1..=tile.zoom).rev() {
        let mask = 1_u32 << (level - 1);
        let mut digit = b'0';
        if tile.col & mask != 0 {
            digit += 1;
        }
        if tile.row & mask != 0 {
            digit += 2;
        }
        digits.push(digit as char);
    }
    QuadKey::from_digits(digits)
}

/// Decodes a quadkey string into tile coordinates.
pub fn quadkey_to_tile(quadkey: &str) -> Result<TileCoord, CoordError> {
    if quadkey.is_empty()
        || quadkey.len() > MAX_ZOOM as usize
        || !quadkey.bytes().all(|b| (b'0'..=b'3').contains(&b))
    {
        return Err(CoordError::InvalidQuadkey(quadkey.to_string()));
    }
    Ok(decode_digits(quadkey))
}

/// Decodes digits already known to be in `0..=3`.
pub(crate) fn decode_digits(digits: &str) -> TileCoord {
    let (mut col, mut row) = (0_u32, 0_u32);
    for b in digits.bytes() {
        let digit = (b - b'0') as u32;
        col = (col << 1) | (digit & 1);
        row = (row << 1) | (digit >> 1);
    }
    TileCoord {
        row,
        col,
        zoom: digits.len() as u8,
    }
}
