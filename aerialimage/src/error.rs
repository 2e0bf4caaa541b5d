//! Error type for aerial image retrieval.
//!
//! Every variant is terminal for the retrieval that raised it: nothing is
//! retried internally and no partial image is ever returned.

use crate::coord::{CoordError, QuadKey, TileCoord};
use crate::source::SourceError;
use thiserror::Error;

/// Errors that can occur while retrieving an aerial image.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Degenerate or malformed bounding box.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No zoom level keeps the image within the configured limits.
    #[error("No zoom level keeps the image within {max_pixel_area} pixels")]
    ImageTooLarge { max_pixel_area: u64 },

    /// A single tile could not be retrieved or decoded.
    #[error("Failed to fetch tile {tile} (quadkey {quadkey}): {source}")]
    TileFetch {
        tile: TileCoord,
        quadkey: QuadKey,
        #[source]
        source: SourceError,
    },

    /// Compositing was invoked without every tile of the grid.
    #[error("Tile {missing} is missing from the fetched tile set")]
    IncompleteTileSet { missing: TileCoord },

    /// The tile fetch stage exceeded its overall deadline.
    #[error("Tile fetch timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The caller cancelled the retrieval.
    #[error("Retrieval cancelled")]
    Cancelled,

    /// A background task failed to complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoordError> for RetrievalError {
    fn from(err: CoordError) -> Self {
        RetrievalError::InvalidInput(err.to_string())
    }
}
