//! CLI error types and exit codes.

use tiledock_core::{ConfigError, LayoutError, PersistenceError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - invalid layouts, rejected edits, I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration or usage error
    pub const CONFIG_ERROR: i32 = 2;
    /// A layout file or item was not found
    pub const NOT_FOUND: i32 = 3;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid arguments for the requested operation
    #[error("Usage error: {0}")]
    Usage(String),

    /// Layout file or item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The layout rejected an edit
    #[error("Layout error: {0}")]
    Layout(String),

    /// The layout document is unreadable or invalid
    #[error("Layout document error: {0}")]
    Document(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::ItemNotFound(_)
            | LayoutError::DraggedItemNotFound(_)
            | LayoutError::DropTargetNotFound(_) => Self::NotFound(err.to_string()),
            other => Self::Layout(other.to_string()),
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        Self::Document(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (layout, document, IO)
    /// - 2: Configuration or usage error
    /// - 3: Layout file or item not found
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Usage(_) => exit_codes::CONFIG_ERROR,
            Self::NotFound(_) => exit_codes::NOT_FOUND,
            Self::Layout(_) | Self::Document(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
