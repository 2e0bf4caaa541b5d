//! High-level aerial image retrieval.
//!
//! [`AerialImageRetrieval`] ties the pipeline together: a request is turned
//! into a bounding box, a zoom level is chosen against the output limits,
//! the covering tile grid is fetched, and the stitched canvas is cropped to
//! the box.
//!
//! ```ignore
//! use aerialimage::config::RetrievalConfig;
//! use aerialimage::retrieval::{AerialImageRetrieval, RetrievalRequest};
//! use aerialimage::source::{AsyncReqwestClient, BingTileSource};
//!
//! let source = BingTileSource::new(AsyncReqwestClient::new()?);
//! let retrieval = AerialImageRetrieval::new(source, RetrievalConfig::default());
//! let request = RetrievalRequest::Corners {
//!     lat1: 41.893812,
//!     lon1: -87.615195,
//!     lat2: 41.885108,
//!     lon2: -87.597778,
//! };
//! let retrieved = retrieval.retrieve(&request).await?;
//! ```

mod request;

pub use request::RetrievalRequest;

use crate::compositor::{composite, crop};
use crate::config::{OutputLimits, RetrievalConfig};
use crate::coord::{BoundingBox, TileGrid};
use crate::error::RetrievalError;
use crate::fetch::TileFetcher;
use crate::resolution::select_zoom;
use crate::source::TileSource;
use image::RgbImage;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// A cropped image together with how it was produced.
#[derive(Debug, Clone)]
pub struct RetrievedImage {
    pub image: RgbImage,
    pub zoom: u8,
    pub bbox: BoundingBox,
    pub grid: TileGrid,
}

impl RetrievedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Retrieves aerial images from a tile source.
///
/// Holds no per-request state, so one instance can serve any number of
/// sequential or concurrent retrievals.
pub struct AerialImageRetrieval<S: TileSource> {
    fetcher: TileFetcher<S>,
    limits: OutputLimits,
}

impl<S: TileSource> AerialImageRetrieval<S> {
    pub fn new(source: S, config: RetrievalConfig) -> Self {
        Self {
            fetcher: TileFetcher::new(source, *config.fetch()),
            limits: *config.limits(),
        }
    }

    pub fn limits(&self) -> &OutputLimits {
        &self.limits
    }

    pub fn source(&self) -> &S {
        self.fetcher.source()
    }

    /// Retrieves the image for `request`.
    pub async fn retrieve(
        &self,
        request: &RetrievalRequest,
    ) -> Result<RetrievedImage, RetrievalError> {
        self.retrieve_with_cancellation(request, CancellationToken::new())
            .await
    }

    /// Retrieves the image for `request`, aborting when `cancellation` fires.
    ///
    /// Either the full image is returned or an error; nothing partial is
    /// ever produced.
    #[instrument(skip(self, cancellation), fields(source = self.fetcher.source().name()))]
    pub async fn retrieve_with_cancellation(
        &self,
        request: &RetrievalRequest,
        cancellation: CancellationToken,
    ) -> Result<RetrievedImage, RetrievalError> {
        let started = Instant::now();

        let bbox = request.bounding_box()?;
        let zoom = select_zoom(&bbox, &self.limits)?;

        let rect = bbox.pixel_rect(zoom);
        if rect.is_empty() {
            return Err(RetrievalError::InvalidInput(format!(
                "bounding box is narrower than one pixel at zoom {}",
                zoom
            )));
        }

        let grid = TileGrid::covering(&bbox, zoom);
        info!(
            zoom,
            width = rect.width(),
            height = rect.height(),
            tiles = grid.tile_count(),
            "Retrieving aerial image"
        );

        let tiles = self.fetcher.fetch_tiles(&grid, cancellation).await?;

        let image = tokio::task::spawn_blocking(move || {
            let canvas = composite(&tiles, &grid)?;
            crop(&canvas, &bbox, zoom, &grid)
        })
        .await
        .map_err(|e| RetrievalError::Internal(format!("compositing task failed: {}", e)))??;

        info!(
            zoom,
            width = image.width(),
            height = image.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aerial image retrieved"
        );

        Ok(RetrievedImage {
            image,
            zoom,
            bbox,
            grid,
        })
    }
}
