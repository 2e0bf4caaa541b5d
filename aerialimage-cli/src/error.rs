//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use aerialimage::config::ConfigFileError;
use aerialimage::output::OutputError;
use aerialimage::source::SourceError;
use aerialimage::RetrievalError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to create the HTTP client
    HttpClient(SourceError),
    /// Retrieval failed
    Retrieval(RetrievalError),
    /// Failed to write the output image
    Output(OutputError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Retrieval(RetrievalError::ImageTooLarge { .. }) => {
                eprintln!();
                eprintln!("Raise --max-pixels or --max-size, or request a smaller area.");
            }
            CliError::Retrieval(RetrievalError::TileFetch { .. }) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection or the tile server is unreachable");
                eprintln!("  2. The area has no imagery at the selected zoom (--detect-missing)");
                eprintln!("  3. A custom --tile-url is missing the {{quadkey}} placeholder");
            }
            CliError::Retrieval(RetrievalError::Timeout { .. }) => {
                eprintln!();
                eprintln!("Try a longer --timeout or fewer --parallel downloads.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Retrieval(e) => write!(f, "Failed to retrieve image: {}", e),
            CliError::Output(e) => write!(f, "Failed to save image: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Retrieval(e) => Some(e),
            CliError::Output(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<RetrievalError> for CliError {
    fn from(e: RetrievalError) -> Self {
        CliError::Retrieval(e)
    }
}

impl From<OutputError> for CliError {
    fn from(e: OutputError) -> Self {
        CliError::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_retrieval_error_display() {
        let err = CliError::from(RetrievalError::Cancelled);
        assert_eq!(err.to_string(), "Failed to retrieve image: Retrieval cancelled");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_logging_error_has_no_source() {
        let err = CliError::LoggingInit("permission denied".to_string());
        assert!(err.to_string().contains("permission denied"));
        assert!(err.source().is_none());
    }
}
