//! Tile source types and traits

use crate::coord::QuadKey;
use image::RgbImage;
use std::fmt;
use std::future::Future;

/// Errors that can occur while fetching a single tile.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// HTTP request failed
    HttpError(String),
    /// Response could not be decoded as an image
    DecodeError(String),
    /// Response decoded but is not a usable tile
    InvalidResponse(String),
    /// Provider returned its "no imagery available" placeholder
    NoImagery,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            SourceError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            SourceError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            SourceError::NoImagery => write!(f, "No imagery available for this tile"),
        }
    }
}

impl std::error::Error for SourceError {}

/// A provider of 256×256 imagery tiles addressed by quadkey.
///
/// Implementations must be shareable across the concurrent fetches of one
/// retrieval.
pub trait TileSource: Send + Sync {
    /// Fetches and decodes the tile at `quadkey`.
    fn fetch(
        &self,
        quadkey: &QuadKey,
    ) -> impl Future<Output = Result<RgbImage, SourceError>> + Send;

    /// Returns the source's name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SourceError::HttpError("HTTP 503".to_string()).to_string(),
            "HTTP error: HTTP 503"
        );
        assert_eq!(
            SourceError::NoImagery.to_string(),
            "No imagery available for this tile"
        );
    }
}
