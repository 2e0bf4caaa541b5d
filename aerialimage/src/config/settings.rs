//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tile provider settings
    pub provider: ProviderSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Output settings
    pub output: OutputSettings,
}

/// Tile provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// URL template containing a `{quadkey}` placeholder
    pub url: String,
    /// Reject tiles identical to the provider's "no imagery" placeholder
    pub detect_missing: bool,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Maximum number of concurrent tile requests
    pub parallel_downloads: usize,
    /// Deadline for the whole tile grid, in seconds
    pub timeout: u64,
    /// Timeout for a single HTTP request, in seconds
    pub request_timeout: u64,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Directory the retrieved image is written to
    pub directory: PathBuf,
    /// Maximum number of pixels in the retrieved image
    pub max_pixel_area: u64,
    /// Optional uncompressed byte budget for the retrieved image
    pub max_size: Option<u64>,
}
