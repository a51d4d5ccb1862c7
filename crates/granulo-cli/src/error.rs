//! Error types for granulo-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for granulo-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in granulo-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from granulo-core
    #[error("{0}")]
    Core(#[from] granulo_core::Error),

    /// Error from granulo-api
    #[error("{0}")]
    Api(#[from] granulo_api::ApiError),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be parsed
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// JSON output could not be produced
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration command error
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("Key 'x' not found");
        assert_eq!(err.to_string(), "Configuration error: Key 'x' not found");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "/tmp/sample.toml",
        );
        assert_eq!(err.to_string(), "I/O error on /tmp/sample.toml: gone");
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: Error = granulo_core::Error::EntryNotFound { index: 2 }.into();
        assert_eq!(err.to_string(), "Sieve entry not found at index 2");
    }
}
