//! Configuration for aerial image retrieval.
//!
//! Runtime configuration is grouped into small builder structs
//! ([`FetchConfig`], [`OutputLimits`], [`RetrievalConfig`]). The optional
//! INI file at `~/.aerialimage/config.ini` is loaded into a [`ConfigFile`],
//! which can produce a [`RetrievalConfig`].
//!
//! # Example
//!
//! ```
//! use aerialimage::config::{ConfigFile, OutputLimits};
//!
//! let file = ConfigFile::parse("[output]\nmax_size = 64MB\n").unwrap();
//! let config = file.retrieval_config();
//! assert_eq!(config.limits().max_bytes(), Some(64 * 1024 * 1024));
//!
//! let limits = OutputLimits::new().with_max_pixel_area(1024 * 1024);
//! assert_eq!(limits.max_pixel_area(), 1_048_576);
//! ```

mod defaults;
mod fetch;
mod file;
mod limits;
mod parser;
mod retrieval;
mod settings;
mod size;

pub use defaults::{
    clamp_parallel_downloads, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_PIXEL_AREA,
    DEFAULT_OUTPUT_DIR, DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TILE_URL,
    MAX_PARALLEL_DOWNLOADS, MIN_PARALLEL_DOWNLOADS,
};
pub use fetch::FetchConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use limits::{OutputLimits, BYTES_PER_PIXEL};
pub use retrieval::RetrievalConfig;
pub use settings::{ConfigFile, DownloadSettings, OutputSettings, ProviderSettings};
pub use size::{format_size, parse_size, ByteSize, SizeParseError};
