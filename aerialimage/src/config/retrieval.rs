//! Top-level retrieval configuration.

use super::{FetchConfig, OutputLimits};

/// Groups the settings a retrieval needs.
///
/// ```
/// use aerialimage::config::{FetchConfig, OutputLimits, RetrievalConfig};
///
/// let config = RetrievalConfig::default()
///     .with_limits(OutputLimits::new().with_max_pixel_area(4096 * 4096))
///     .with_fetch(FetchConfig::new().with_parallel_downloads(8));
/// assert_eq!(config.limits().max_pixel_area(), 4096 * 4096);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalConfig {
    limits: OutputLimits,
    fetch: FetchConfig,
}

impl RetrievalConfig {
    pub fn new(limits: OutputLimits, fetch: FetchConfig) -> Self {
        Self { limits, fetch }
    }

    pub fn with_limits(mut self, limits: OutputLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn limits(&self) -> &OutputLimits {
        &self.limits
    }

    pub fn fetch(&self) -> &FetchConfig {
        &self.fetch
    }
}
