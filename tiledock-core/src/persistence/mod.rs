//! Layout persistence
//!
//! # Module Structure
//!
//! - `document` - Versioned `LayoutDocument` envelope and migration
//! - `store` - `LayoutStore` trait, memory and file stores, session helpers
//! - `error` - Error types (`PersistenceError`)

mod document;
mod error;
mod store;

pub use document::{
    DocumentFormat, LAYOUT_SCHEMA_VERSION, LEGACY_SCHEMA_VERSION, LayoutDocument,
    MigrationResult, migrate_document, needs_migration,
};
pub use error::{PersistenceError, PersistenceResult};
pub use store::{
    FileLayoutStore, LayoutStore, MemoryLayoutStore, load_session, read_document, save_session,
    write_document,
};
