//! Key-value stores for layout blobs
//!
//! The layout and the active tab table live under two keys, as a host's
//! local storage would hold them. [`save_session`] and [`load_session`]
//! write and read both.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::document::{DocumentFormat, LayoutDocument};
use super::error::{PersistenceError, PersistenceResult};
use crate::config::StorageSettings;
use crate::layout::{ActiveTabState, NodeRef};
use crate::tracing::span_names;

/// String key-value storage.
pub trait LayoutStore {
    /// Reads the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Removes `key`; missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> PersistenceResult<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    entries: HashMap<String, String>,
}

impl MemoryLayoutStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one file per key.
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    dir: PathBuf,
    format: DocumentFormat,
}

impl FileLayoutStore {
    /// Creates a store writing `<key>.json` files under `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: DocumentFormat::Json,
        }
    }

    /// Switches the file format used for documents.
    #[must_use]
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    /// The store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document format of this store.
    #[must_use]
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    fn path_for(&self, key: &str) -> PersistenceResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{}", self.format.extension())))
    }
}

impl LayoutStore for FileLayoutStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io(format!("{}: {e}", path.display()))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| PersistenceError::Io(format!("{}: {e}", self.dir.display())))?;
        fs::write(&path, value)
            .map_err(|e| PersistenceError::Io(format!("{}: {e}", path.display())))
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io(format!("{}: {e}", path.display()))),
        }
    }
}

/// Saves a layout and its active tab table under the configured keys.
///
/// An empty layout removes the layout key.
///
/// # Errors
///
/// Returns the first serialization or store error.
pub fn save_session(
    store: &mut dyn LayoutStore,
    keys: &StorageSettings,
    format: DocumentFormat,
    layout: Option<&NodeRef>,
    active_tabs: &ActiveTabState,
) -> PersistenceResult<()> {
    let _span = crate::trace_operation!(span_names::PERSISTENCE_SAVE, key = %keys.layout_key)
        .entered();
    match layout {
        Some(layout) => {
            let document = LayoutDocument::new(Some(NodeRef::clone(layout)), active_tabs.clone());
            store.set(&keys.layout_key, &document.to_text(format)?)?;
        }
        None => store.remove(&keys.layout_key)?,
    }
    let tabs = serde_json::to_string(active_tabs)
        .map_err(|e| PersistenceError::Serialize(e.to_string()))?;
    store.set(&keys.active_tabs_key, &tabs)?;
    tracing::debug!(key = %keys.layout_key, "Layout saved");
    Ok(())
}

/// Loads the layout saved under the configured keys.
///
/// Returns `None` when nothing was saved. The separately stored active tab
/// table, when present, wins over the one in the document.
///
/// # Errors
///
/// Returns the first store, parse, migration or validation error.
pub fn load_session(
    store: &dyn LayoutStore,
    keys: &StorageSettings,
    format: DocumentFormat,
) -> PersistenceResult<Option<LayoutDocument>> {
    let _span = crate::trace_operation!(span_names::PERSISTENCE_LOAD, key = %keys.layout_key)
        .entered();
    let Some(text) = store.get(&keys.layout_key)? else {
        return Ok(None);
    };
    let mut document = LayoutDocument::load(&text, format)?;
    if let Some(tabs) = store.get(&keys.active_tabs_key)? {
        document.active_tabs =
            serde_json::from_str(&tabs).map_err(|e| PersistenceError::Parse(e.to_string()))?;
    }
    Ok(Some(document))
}

/// Reads a document file, picking the format from its extension.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or the load error.
pub fn read_document(path: &Path) -> PersistenceResult<LayoutDocument> {
    let text = fs::read_to_string(path)
        .map_err(|e| PersistenceError::Io(format!("{}: {e}", path.display())))?;
    LayoutDocument::load(&text, DocumentFormat::from_path(path))
}

/// Writes a document file, picking the format from its extension.
///
/// # Errors
///
/// Returns `Serialize` or `Io`.
pub fn write_document(path: &Path, document: &LayoutDocument) -> PersistenceResult<()> {
    let text = document.to_text(DocumentFormat::from_path(path))?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PersistenceError::Io(format!("{}: {e}", parent.display())))?;
    }
    fs::write(path, text).map_err(|e| PersistenceError::Io(format!("{}: {e}", path.display())))
}
