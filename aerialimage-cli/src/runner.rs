//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, retrieval and
//! saving so `main` only deals with argument handling.

use crate::error::CliError;
use aerialimage::config::ConfigFile;
use aerialimage::logging::{init_logging, LoggingGuard, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE};
use aerialimage::output::{ImageWriter, JpegFileWriter};
use aerialimage::retrieval::{AerialImageRetrieval, RetrievalRequest, RetrievedImage};
use aerialimage::source::{AsyncReqwestClient, BingTileSource};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the log file writer alive while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Initialize logging and take ownership of the effective configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration with command-line overrides applied
    /// * `verbose` - When true, logs at debug level unless RUST_LOG is set
    pub fn new(config: ConfigFile, verbose: bool) -> Result<Self, CliError> {
        let level = if verbose { "debug" } else { "info" };
        let logging_guard = init_logging(Path::new(DEFAULT_LOG_DIR), DEFAULT_LOG_FILE, level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Load the configuration file, from `path` when given.
    pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
        let config = match path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        Ok(config)
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information.
    pub fn log_startup(&self) {
        info!("aerialimage v{}", aerialimage::VERSION);
        info!(
            url = %self.config.provider.url,
            parallel = self.config.download.parallel_downloads,
            timeout_secs = self.config.download.timeout,
            "Configuration loaded"
        );
    }

    /// Retrieve the image for `request`, cancelling on Ctrl-C.
    pub async fn retrieve(&self, request: &RetrievalRequest) -> Result<RetrievedImage, CliError> {
        let client = AsyncReqwestClient::with_timeout(self.config.download.request_timeout)
            .map_err(CliError::HttpClient)?;
        let source = BingTileSource::with_url(client, self.config.provider.url.clone())
            .with_missing_detection(self.config.provider.detect_missing);
        let retrieval = AerialImageRetrieval::new(source, self.config.retrieval_config());

        let cancellation = CancellationToken::new();
        let watcher = {
            let cancellation = cancellation.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling retrieval");
                    cancellation.cancel();
                }
            })
        };

        let result = retrieval
            .retrieve_with_cancellation(request, cancellation)
            .await;
        watcher.abort();

        Ok(result?)
    }

    /// Save the retrieved image into the configured output directory.
    pub fn save(&self, retrieved: &RetrievedImage) -> Result<PathBuf, CliError> {
        let writer = JpegFileWriter::new(&self.config.output.directory);
        Ok(writer.write(&retrieved.image, retrieved.zoom)?)
    }
}
