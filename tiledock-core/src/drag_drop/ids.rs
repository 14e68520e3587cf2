//! Draggable and dropzone identifiers
//!
//! Ids are opaque strings with a kind prefix so that a token found in a
//! transfer payload can never be mistaken for the other namespace.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transfer payload format under which the draggable token is stored.
pub const TRANSFER_FORMAT: &str = "text";

const DRAGGABLE_PREFIX: &str = "draggable__";
const DROPZONE_PREFIX: &str = "droppable__";

/// Identifier assigned to a draggable component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraggableId(String);

impl DraggableId {
    /// Creates a new random draggable id.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("{DRAGGABLE_PREFIX}{}", Uuid::new_v4()))
    }

    /// Parses a token read back from a transfer payload.
    ///
    /// Returns `None` for strings outside the draggable namespace.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        token
            .starts_with(DRAGGABLE_PREFIX)
            .then(|| Self(token.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DraggableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier assigned to a dropzone component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropzoneId(String);

impl DropzoneId {
    /// Creates a new random dropzone id.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("{DROPZONE_PREFIX}{}", Uuid::new_v4()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DropzoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DropzoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes a host attaches to a draggable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableAttributes {
    /// Always true; marks the element as natively draggable.
    pub draggable: bool,
    /// Token written to the transfer payload at drag start.
    pub draggable_id: DraggableId,
}

/// Attributes a host attaches to a dropzone element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropzoneAttributes {
    /// Marker used to find the nearest dropzone ancestor of an element.
    pub dropzone_id: DropzoneId,
}

/// Minimal model of a native drag transfer payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: BTreeMap<String, String>,
}

impl DataTransfer {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under a format.
    pub fn set_data(&mut self, format: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(format.into(), value.into());
    }

    /// Reads the value stored under a format.
    #[must_use]
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries.get(format).map(String::as_str)
    }
}
