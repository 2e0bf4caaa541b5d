//! Imagery tile sources
//!
//! A [`TileSource`] turns a quadkey into a decoded 256×256 RGB tile. The
//! Bing source downloads through an [`AsyncHttpClient`], so tests can swap
//! the network for canned responses.
//!
//! ```ignore
//! use aerialimage::source::{AsyncReqwestClient, BingTileSource};
//!
//! let source = BingTileSource::new(AsyncReqwestClient::new()?).with_missing_detection(true);
//! ```

mod bing;
mod decode;
mod http;
mod types;

pub use bing::{BingTileSource, NULL_TILE_QUADKEY};
pub use decode::{decode_tile, decode_tile_blocking};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use types::{SourceError, TileSource};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, RoutingHttpClient};
