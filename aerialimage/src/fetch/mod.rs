//! Concurrent tile fetching.
//!
//! [`TileFetcher`] pulls every tile of a [`TileGrid`] from a [`TileSource`]
//! with a bounded number of requests in flight. The first failure aborts the
//! whole fetch; in-flight requests are dropped with it.
//!
//! The fetch as a whole is bounded by [`FetchConfig::timeout`] and can be
//! cancelled through a [`CancellationToken`].

mod progress;

pub use progress::FetchProgress;

use crate::config::FetchConfig;
use crate::coord::{TileCoord, TileGrid};
use crate::error::RetrievalError;
use crate::source::TileSource;
use futures::stream::{self, StreamExt};
use image::RgbImage;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Decoded tiles keyed by address.
pub type TileSet = HashMap<TileCoord, RgbImage>;

/// Fetches the tiles of a grid from a source.
pub struct TileFetcher<S: TileSource> {
    source: S,
    config: FetchConfig,
}

impl<S: TileSource> TileFetcher<S> {
    pub fn new(source: S, config: FetchConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches every tile of `grid`.
    ///
    /// Requests are issued in row-major order. Results are keyed by tile
    /// address, so arrival order does not matter to the caller.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::TileFetch`] for the first tile that fails
    /// - [`RetrievalError::Timeout`] when the grid is not done within the
    ///   configured deadline
    /// - [`RetrievalError::Cancelled`] when `cancellation` fires first
    pub async fn fetch_tiles(
        &self,
        grid: &TileGrid,
        cancellation: CancellationToken,
    ) -> Result<TileSet, RetrievalError> {
        if cancellation.is_cancelled() {
            debug!("Tile fetch cancelled before starting");
            return Err(RetrievalError::Cancelled);
        }

        debug!(
            source = self.source.name(),
            zoom = grid.zoom(),
            columns = grid.columns(),
            rows = grid.rows(),
            parallel = self.config.parallel_downloads(),
            "Starting tile fetch"
        );

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                debug!("Tile fetch cancelled");
                Err(RetrievalError::Cancelled)
            }
            result = tokio::time::timeout(self.config.timeout(), self.fetch_all(grid)) => {
                match result {
                    Ok(tiles) => tiles,
                    Err(_) => {
                        warn!(
                            timeout_secs = self.config.timeout_secs(),
                            "Tile fetch timed out"
                        );
                        Err(RetrievalError::Timeout {
                            secs: self.config.timeout_secs(),
                        })
                    }
                }
            }
        }
    }

    async fn fetch_all(&self, grid: &TileGrid) -> Result<TileSet, RetrievalError> {
        let source = &self.source;
        let mut progress = FetchProgress::new(grid.tile_count(), grid.columns() as usize);
        let mut tiles = TileSet::with_capacity(grid.tile_count());

        let mut fetches = stream::iter(grid.tiles())
            .map(|tile| async move {
                let quadkey = tile.quadkey();
                let result = source.fetch(&quadkey).await;
                (tile, quadkey, result)
            })
            .buffer_unordered(self.config.parallel_downloads());

        while let Some((tile, quadkey, result)) = fetches.next().await {
            match result {
                Ok(image) => {
                    tiles.insert(tile, image);
                    progress.record();
                }
                Err(source) => {
                    warn!(
                        tile = %tile,
                        quadkey = %quadkey,
                        error = %source,
                        "Tile fetch failed"
                    );
                    return Err(RetrievalError::TileFetch {
                        tile,
                        quadkey,
                        source,
                    });
                }
            }
        }

        progress.finish();
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::QuadKey;
    use crate::source::SourceError;
    use image::Rgb;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Serves solid tiles colored by position and records request order.
    #[derive(Default)]
    struct RecordingSource {
        requested: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Option<Duration>,
        fail_on: Option<String>,
    }

    impl TileSource for RecordingSource {
        async fn fetch(&self, quadkey: &QuadKey) -> Result<RgbImage, SourceError> {
            self.requested.lock().unwrap().push(quadkey.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.as_deref() == Some(quadkey.as_str()) {
                return Err(SourceError::HttpError("HTTP 503".to_string()));
            }

            let tile = quadkey.to_tile();
            Ok(RgbImage::from_pixel(
                256,
                256,
                Rgb([tile.col as u8, tile.row as u8, tile.zoom]),
            ))
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn grid_2x3() -> TileGrid {
        TileGrid::new(5, 10, 20, 11, 22).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_every_tile_once() {
        let fetcher = TileFetcher::new(RecordingSource::default(), FetchConfig::default());
        let grid = grid_2x3();

        let tiles = fetcher
            .fetch_tiles(&grid, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(tiles.len(), 6);
        for tile in grid.tiles() {
            let image = &tiles[&tile];
            assert_eq!(
                image.get_pixel(0, 0),
                &Rgb([tile.col as u8, tile.row as u8, 5])
            );
        }
    }

    #[tokio::test]
    async fn test_requests_issued_in_row_major_order() {
        let source = RecordingSource::default();
        let fetcher = TileFetcher::new(source, FetchConfig::new().with_parallel_downloads(1));
        let grid = grid_2x3();

        fetcher
            .fetch_tiles(&grid, CancellationToken::new())
            .await
            .unwrap();

        let expected: Vec<String> = grid.tiles().map(|t| t.quadkey().to_string()).collect();
        assert_eq!(*fetcher.source().requested.lock().unwrap(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let source = RecordingSource {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        };
        let fetcher = TileFetcher::new(source, FetchConfig::new().with_parallel_downloads(2));
        let grid = TileGrid::new(6, 0, 0, 3, 3).unwrap();

        let tiles = fetcher
            .fetch_tiles(&grid, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(tiles.len(), 16);
        assert_eq!(fetcher.source().max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_failure_aborts_fetch() {
        let grid = grid_2x3();
        let failing = TileCoord::new(11, 21, 5);
        let source = RecordingSource {
            fail_on: Some(failing.quadkey().to_string()),
            ..Default::default()
        };
        let fetcher = TileFetcher::new(source, FetchConfig::default());

        let err = fetcher
            .fetch_tiles(&grid, CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            RetrievalError::TileFetch {
                tile,
                quadkey,
                source,
            } => {
                assert_eq!(tile, failing);
                assert_eq!(quadkey, failing.quadkey());
                assert_eq!(source, SourceError::HttpError("HTTP 503".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let source = RecordingSource {
            delay: Some(Duration::from_secs(3600)),
            ..Default::default()
        };
        let fetcher = TileFetcher::new(source, FetchConfig::new().with_timeout_secs(5));

        let err = fetcher
            .fetch_tiles(&grid_2x3(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Timeout { secs: 5 }));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let fetcher = TileFetcher::new(RecordingSource::default(), FetchConfig::default());
        let token = CancellationToken::new();
        token.cancel();

        let err = fetcher.fetch_tiles(&grid_2x3(), token).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Cancelled));
        assert!(fetcher.source().requested.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_while_fetching() {
        let source = RecordingSource {
            delay: Some(Duration::from_secs(60)),
            ..Default::default()
        };
        let fetcher = Arc::new(TileFetcher::new(source, FetchConfig::default()));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let err = fetcher.fetch_tiles(&grid_2x3(), token).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Cancelled));
    }
}
