//! Coordinate type definitions

use std::fmt;
use std::str::FromStr;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Levels of detail supported by the Bing tile system
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 23;

/// Edge length of a single tile, in pixels.
pub const TILE_SIZE: u32 = 256;

/// WGS-84 equatorial radius used by the tile system, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// A geographic position in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the point clamped to the range the projection is defined on.
    pub fn clamped(self) -> Self {
        Self {
            latitude: super::clip(self.latitude, MIN_LAT, MAX_LAT),
            longitude: super::clip(self.longitude, MIN_LON, MAX_LON),
        }
    }

    /// Rejects NaN and infinite components.
    pub(crate) fn ensure_finite(self) -> Result<Self, CoordError> {
        if !self.latitude.is_finite() {
            return Err(CoordError::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() {
            return Err(CoordError::InvalidLongitude(self.longitude));
        }
        Ok(self)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A pixel position on the whole-world map at some zoom level.
///
/// Valid values lie in `[0, map_size(zoom))` on both axes; `x` grows east,
/// `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Tile coordinates in the Bing tile system.
///
/// Represents one 256×256 pixel tile of the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
    /// X coordinate (east-west), 0 at west
    pub col: u32,
    /// Zoom level (1-23)
    pub zoom: u8,
}

impl TileCoord {
    pub fn new(col: u32, row: u32, zoom: u8) -> Self {
        Self { row, col, zoom }
    }

    /// Returns the quadkey addressing this tile.
    pub fn quadkey(&self) -> QuadKey {
        super::tile_to_quadkey(self)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Base-4 tile address used by the tile provider.
///
/// Always holds between 1 and 23 digits in `0..=3`; its length is the zoom
/// level of the tile it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuadKey(String);

impl QuadKey {
    /// Wraps digits produced by the encoder. Callers guarantee validity.
    pub(crate) fn from_digits(digits: String) -> Self {
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zoom level encoded by this key.
    pub fn zoom(&self) -> u8 {
        self.0.len() as u8
    }

    /// Decodes the key back into tile coordinates.
    pub fn to_tile(&self) -> TileCoord {
        super::decode_digits(&self.0)
    }
}

impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QuadKey {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::quadkey_to_tile(s).map(|_| QuadKey(s.to_string()))
    }
}

impl AsRef<str> for QuadKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for QuadKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is not a finite number
    InvalidLatitude(f64),
    /// Longitude is not a finite number
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (1 to 23)
    InvalidZoom(u8),
    /// Quadkey contains invalid characters or has an invalid length
    InvalidQuadkey(String),
    /// Bounding box has zero area
    DegenerateBox(String),
    /// Tile range is empty or outside the map
    InvalidTileRange(String),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(f, "Invalid latitude: {} (must be a finite number)", lat)
            }
            CoordError::InvalidLongitude(lon) => {
                write!(f, "Invalid longitude: {} (must be a finite number)", lon)
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::InvalidQuadkey(quadkey) => {
                write!(
                    f,
                    "Invalid quadkey: '{}' (must contain only digits 0-3 and have length 1..={})",
                    quadkey, MAX_ZOOM
                )
            }
            CoordError::DegenerateBox(reason) => {
                write!(f, "Degenerate bounding box: {}", reason)
            }
            CoordError::InvalidTileRange(reason) => {
                write!(f, "Invalid tile range: {}", reason)
            }
        }
    }
}

impl std::error::Error for CoordError {}
