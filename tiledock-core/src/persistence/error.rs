//! Persistence errors

use thiserror::Error;

/// Errors that can occur while loading or saving layouts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Failed to parse a stored document
    #[error("Failed to parse layout document: {0}")]
    Parse(String),

    /// Failed to serialize a document
    #[error("Failed to serialize layout document: {0}")]
    Serialize(String),

    /// I/O error while reading or writing a store
    #[error("I/O error: {0}")]
    Io(String),

    /// The document was written by a schema this build cannot read
    #[error("Unsupported layout schema version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the document
        found: u16,
        /// Version this build writes
        supported: u16,
    },

    /// The stored tree breaks a structural invariant
    #[error("Invalid layout: {issue_count} issue(s), first: {first_issue}")]
    InvalidLayout {
        /// Number of violations
        issue_count: usize,
        /// Description of the first violation
        first_issue: String,
    },

    /// A store key that cannot be used as a file name
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;
