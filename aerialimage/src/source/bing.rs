//! Bing quadkey tile source

use super::decode::decode_tile_blocking;
use super::http::AsyncHttpClient;
use super::types::{SourceError, TileSource};
use crate::config::DEFAULT_TILE_URL;
use crate::coord::QuadKey;
use image::RgbImage;
use tokio::sync::OnceCell;
use tracing::debug;

/// Quadkey at which the provider answers with its "no imagery" placeholder.
pub const NULL_TILE_QUADKEY: &str = "11111111111111111111";

/// Bing Maps aerial imagery source.
///
/// Substitutes each tile's quadkey into a URL template, downloads the tile
/// and decodes it.
///
/// The provider does not return an error for tiles it has no imagery for;
/// it serves a fixed placeholder image instead. With missing-imagery
/// detection enabled, the placeholder is fetched once and any tile identical
/// to it fails with [`SourceError::NoImagery`].
pub struct BingTileSource<C: AsyncHttpClient> {
    http_client: C,
    url_template: String,
    detect_missing: bool,
    placeholder: OnceCell<RgbImage>,
}

impl<C: AsyncHttpClient> BingTileSource<C> {
    /// Creates a source using the default Bing aerial tile URL.
    pub fn new(http_client: C) -> Self {
        Self::with_url(http_client, DEFAULT_TILE_URL.to_string())
    }

    /// Creates a source with a custom URL template.
    ///
    /// The template should contain `{quadkey}` as a placeholder.
    pub fn with_url(http_client: C, url_template: String) -> Self {
        Self {
            http_client,
            url_template,
            detect_missing: false,
            placeholder: OnceCell::new(),
        }
    }

    /// Enables or disables rejection of "no imagery" placeholder tiles.
    pub fn with_missing_detection(mut self, enabled: bool) -> Self {
        self.detect_missing = enabled;
        self
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    fn build_url(&self, quadkey: &str) -> String {
        self.url_template.replace("{quadkey}", quadkey)
    }

    async fn download(&self, quadkey: &str) -> Result<RgbImage, SourceError> {
        let url = self.build_url(quadkey);
        let bytes = self.http_client.get(&url).await?;
        decode_tile_blocking(bytes).await
    }

    async fn placeholder(&self) -> Result<&RgbImage, SourceError> {
        self.placeholder
            .get_or_try_init(|| async {
                debug!(quadkey = NULL_TILE_QUADKEY, "Fetching no-imagery placeholder");
                self.download(NULL_TILE_QUADKEY).await
            })
            .await
    }
}

impl<C: AsyncHttpClient> TileSource for BingTileSource<C> {
    async fn fetch(&self, quadkey: &QuadKey) -> Result<RgbImage, SourceError> {
        let tile = self.download(quadkey.as_str()).await?;

        if self.detect_missing && tile == *self.placeholder().await? {
            return Err(SourceError::NoImagery);
        }

        Ok(tile)
    }

    fn name(&self) -> &str {
        "Bing Maps"
    }
}
