//! Versioned layout documents
//!
//! A saved layout is a [`LayoutDocument`] envelope. Blobs written before the
//! envelope existed hold a bare tree (or `null`); they parse as schema
//! version 0 and migrate forward on load.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{PersistenceError, PersistenceResult};
use crate::layout::{ActiveTabState, LayoutNode, NodeRef, check_invariants, tab_groups};

/// Current layout document schema version.
pub const LAYOUT_SCHEMA_VERSION: u16 = 1;

/// Schema version assigned to bare trees without an envelope.
pub const LEGACY_SCHEMA_VERSION: u16 = 0;

/// Text encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON (default)
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension (`.yaml`/`.yml` or JSON).
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// File extension used for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// A persisted layout with its active tab table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Schema version for migration detection.
    pub schema_version: u16,
    /// The tree; `None` for an empty layout.
    #[serde(default)]
    pub layout: Option<NodeRef>,
    /// Active tab index per tab group.
    #[serde(default, skip_serializing_if = "ActiveTabState::is_empty")]
    pub active_tabs: ActiveTabState,
    /// When the document was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Shapes accepted on load.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLayout {
    Envelope(LayoutDocument),
    Bare(Option<LayoutNode>),
}

impl LayoutDocument {
    /// Creates a current-version document stamped with the current time.
    #[must_use]
    pub fn new(layout: Option<NodeRef>, active_tabs: ActiveTabState) -> Self {
        Self {
            schema_version: LAYOUT_SCHEMA_VERSION,
            layout,
            active_tabs,
            saved_at: Some(Utc::now()),
        }
    }

    /// Parses a document without migrating it.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Parse` for text that is neither an
    /// envelope nor a bare tree.
    pub fn parse(text: &str, format: DocumentFormat) -> PersistenceResult<Self> {
        let stored: StoredLayout = match format {
            DocumentFormat::Json => {
                serde_json::from_str(text).map_err(|e| PersistenceError::Parse(e.to_string()))?
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| PersistenceError::Parse(e.to_string()))?
            }
        };
        Ok(match stored {
            StoredLayout::Envelope(document) => document,
            StoredLayout::Bare(layout) => Self {
                schema_version: LEGACY_SCHEMA_VERSION,
                layout: layout.map(NodeRef::new),
                active_tabs: ActiveTabState::new(),
                saved_at: None,
            },
        })
    }

    /// Parses, migrates and validates a document.
    ///
    /// # Errors
    ///
    /// Returns the first parse, migration or validation error.
    pub fn load(text: &str, format: DocumentFormat) -> PersistenceResult<Self> {
        let document = migrate_document(Self::parse(text, format)?)?.document;
        document.validate()?;
        Ok(document)
    }

    /// Encodes the document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Serialize` if encoding fails.
    pub fn to_text(&self, format: DocumentFormat) -> PersistenceResult<String> {
        match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| PersistenceError::Serialize(e.to_string())),
            DocumentFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| PersistenceError::Serialize(e.to_string()))
            }
        }
    }

    /// Checks the schema version and the structural invariants of the tree.
    ///
    /// Active tab entries for groups missing from the tree are tolerated;
    /// the container drops them on restore.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion` or `InvalidLayout`.
    pub fn validate(&self) -> PersistenceResult<()> {
        if self.schema_version != LAYOUT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.schema_version,
                supported: LAYOUT_SCHEMA_VERSION,
            });
        }
        let Some(layout) = &self.layout else {
            return Ok(());
        };
        let violations = check_invariants(layout);
        if let Some(first) = violations.first() {
            return Err(PersistenceError::InvalidLayout {
                issue_count: violations.len(),
                first_issue: first.to_string(),
            });
        }
        Ok(())
    }

    /// Active tab entries whose group is not in the tree.
    #[must_use]
    pub fn stale_active_tabs(&self) -> usize {
        let groups = self.layout.as_ref().map(tab_groups).unwrap_or_default();
        self.active_tabs
            .iter()
            .filter(|(id, _)| !groups.iter().any(|group| &group.id == *id))
            .count()
    }
}

/// Outcome of migrating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationResult {
    /// Version found in the input.
    pub from_version: u16,
    /// Version of the output.
    pub to_version: u16,
    /// The migrated document.
    pub document: LayoutDocument,
}

/// Brings a document up to [`LAYOUT_SCHEMA_VERSION`].
///
/// # Errors
///
/// Returns `UnsupportedVersion` for documents written by a newer version.
pub fn migrate_document(document: LayoutDocument) -> PersistenceResult<MigrationResult> {
    match document.schema_version {
        LAYOUT_SCHEMA_VERSION => Ok(MigrationResult {
            from_version: LAYOUT_SCHEMA_VERSION,
            to_version: LAYOUT_SCHEMA_VERSION,
            document,
        }),
        LEGACY_SCHEMA_VERSION => {
            tracing::debug!("Migrating bare layout tree to schema version {LAYOUT_SCHEMA_VERSION}");
            Ok(MigrationResult {
                from_version: LEGACY_SCHEMA_VERSION,
                to_version: LAYOUT_SCHEMA_VERSION,
                document: LayoutDocument {
                    schema_version: LAYOUT_SCHEMA_VERSION,
                    ..document
                },
            })
        }
        found => Err(PersistenceError::UnsupportedVersion {
            found,
            supported: LAYOUT_SCHEMA_VERSION,
        }),
    }
}

/// Checks whether a document requires migration.
#[must_use]
pub fn needs_migration(document: &LayoutDocument) -> bool {
    document.schema_version != LAYOUT_SCHEMA_VERSION
}
