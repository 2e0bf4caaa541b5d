//! Tile fetch configuration.

use super::defaults::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PARALLEL_DOWNLOADS};
use std::time::Duration;

/// Configuration for fetching a tile grid.
///
/// # Example
///
/// ```
/// use aerialimage::config::FetchConfig;
///
/// let config = FetchConfig::default();
/// assert_eq!(config.parallel_downloads(), 16);
/// assert_eq!(config.timeout_secs(), 120);
///
/// let config = FetchConfig::new()
///     .with_parallel_downloads(4)
///     .with_timeout_secs(30);
/// assert_eq!(config.parallel_downloads(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum number of tiles in flight at once
    parallel_downloads: usize,
    /// Deadline for fetching the whole grid (in seconds)
    timeout_secs: u64,
}

impl FetchConfig {
    /// Create a new fetch configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of concurrent tile requests.
    ///
    /// Zero is treated as one.
    pub fn with_parallel_downloads(mut self, parallel: usize) -> Self {
        self.parallel_downloads = parallel.max(1);
        self
    }

    /// Set the deadline for fetching the whole grid, in seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn parallel_downloads(&self) -> usize {
        self.parallel_downloads
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}
