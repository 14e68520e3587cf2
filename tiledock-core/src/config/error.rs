//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no user config directory
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the settings schema
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Settings file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Settings could not be encoded
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
