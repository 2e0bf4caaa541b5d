//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::settings::*;

// =============================================================================
// Download defaults
// =============================================================================

/// Default number of tiles fetched concurrently.
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 16;

/// Lower bound for concurrent tile fetches.
pub const MIN_PARALLEL_DOWNLOADS: usize = 1;

/// Upper bound for concurrent tile fetches.
/// Above this, the tile provider starts rejecting requests.
pub const MAX_PARALLEL_DOWNLOADS: usize = 128;

/// Default deadline for fetching a whole tile grid, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;

/// Default per-request HTTP timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Output defaults
// =============================================================================

/// Default output pixel budget (8192 × 8192, about 256MB uncompressed).
pub const DEFAULT_MAX_PIXEL_AREA: u64 = 8192 * 8192;

/// Default directory for retrieved images.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

// =============================================================================
// Provider defaults
// =============================================================================

/// Default tile URL template; `{quadkey}` is replaced per tile.
pub const DEFAULT_TILE_URL: &str = "http://h0.ortho.tiles.virtualearth.net/tiles/h{quadkey}.jpeg?g=131";

/// Clamps parallel downloads to a valid range and logs a warning if clamped.
pub fn clamp_parallel_downloads(value: usize) -> usize {
    if value < MIN_PARALLEL_DOWNLOADS {
        tracing::warn!(
            requested = value,
            min = MIN_PARALLEL_DOWNLOADS,
            "parallel_downloads below minimum, clamping to {}",
            MIN_PARALLEL_DOWNLOADS
        );
        MIN_PARALLEL_DOWNLOADS
    } else if value > MAX_PARALLEL_DOWNLOADS {
        tracing::warn!(
            requested = value,
            max = MAX_PARALLEL_DOWNLOADS,
            "parallel_downloads above maximum, clamping to {}",
            MAX_PARALLEL_DOWNLOADS
        );
        MAX_PARALLEL_DOWNLOADS
    } else {
        value
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                url: DEFAULT_TILE_URL.to_string(),
                detect_missing: false,
            },
            download: DownloadSettings {
                parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
                timeout: DEFAULT_FETCH_TIMEOUT_SECS,
                request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            output: OutputSettings {
                directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
                max_pixel_area: DEFAULT_MAX_PIXEL_AREA,
                max_size: None,
            },
        }
    }
}
