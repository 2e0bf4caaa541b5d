//! Configuration file handling for ~/.aerialimage/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in
//! [`super::defaults`] and parsing in [`super::parser`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use super::{FetchConfig, OutputLimits, RetrievalConfig};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load configuration from the default path (~/.aerialimage/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        super::parser::parse_ini(&ini)
    }

    /// Build the retrieval configuration described by this file.
    pub fn retrieval_config(&self) -> RetrievalConfig {
        let mut limits = OutputLimits::new().with_max_pixel_area(self.output.max_pixel_area);
        if let Some(bytes) = self.output.max_size {
            limits = limits.with_max_bytes(bytes);
        }

        let fetch = FetchConfig::new()
            .with_parallel_downloads(self.download.parallel_downloads)
            .with_timeout_secs(self.download.timeout);

        RetrievalConfig::new(limits, fetch)
    }
}

/// Get the path to the config directory (~/.aerialimage).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aerialimage")
}

/// Get the path to the config file (~/.aerialimage/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
