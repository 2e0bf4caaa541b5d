//! aerialimage - Aerial imagery retrieval from the Bing tile system
//!
//! Given a geographic bounding box, this library picks the most detailed
//! zoom level that keeps the output within a size limit, downloads every
//! covering tile concurrently, stitches them and crops the result to the
//! exact box.
//!
//! # High-Level API
//!
//! The [`retrieval`] module provides the facade:
//!
//! ```ignore
//! use aerialimage::config::RetrievalConfig;
//! use aerialimage::output::{ImageWriter, JpegFileWriter};
//! use aerialimage::retrieval::{AerialImageRetrieval, RetrievalRequest};
//! use aerialimage::source::{AsyncReqwestClient, BingTileSource};
//!
//! let source = BingTileSource::new(AsyncReqwestClient::new()?);
//! let retrieval = AerialImageRetrieval::new(source, RetrievalConfig::default());
//! let retrieved = retrieval
//!     .retrieve(&RetrievalRequest::Corners {
//!         lat1: 41.893812,
//!         lon1: -87.615195,
//!         lat2: 41.885108,
//!         lon2: -87.597778,
//!     })
//!     .await?;
//! JpegFileWriter::new("output").write(&retrieved.image, retrieved.zoom)?;
//! ```

pub mod compositor;
pub mod config;
pub mod coord;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod resolution;
pub mod retrieval;
pub mod source;

pub use error::RetrievalError;

/// Version of the aerialimage library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
