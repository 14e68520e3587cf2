//! Property-based tests for layout documents
//!
//! Saved layouts must reload to the same tree in either format, and bare
//! trees from before the envelope must migrate transparently.

use proptest::prelude::*;
use tiledock_core::layout::tab_groups;
use tiledock_core::persistence::{
    LAYOUT_SCHEMA_VERSION, load_session, needs_migration, save_session,
};
use tiledock_core::{
    ActiveTabState, DocumentFormat, LayoutDocument, LayoutStore, MemoryLayoutStore,
    PersistenceError, StorageSettings,
};

use super::arb_tree;

fn arb_format() -> impl Strategy<Value = DocumentFormat> {
    prop_oneof![Just(DocumentFormat::Json), Just(DocumentFormat::Yaml)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A document reloads to the same layout and active tab table.
    #[test]
    fn prop_document_reloads_identically(tree in arb_tree(), format in arb_format()) {
        let active: ActiveTabState = tab_groups(&tree)
            .iter()
            .map(|group| (group.id.clone(), group.tabs.len() - 1))
            .collect();
        let document = LayoutDocument::new(Some(tree), active);

        let text = document.to_text(format).unwrap();
        let loaded = LayoutDocument::load(&text, format).unwrap();
        prop_assert_eq!(loaded, document);
    }

    /// A bare serialized tree loads as a current-version document.
    #[test]
    fn prop_bare_tree_migrates(tree in arb_tree()) {
        let bare = serde_json::to_string(tree.as_ref()).unwrap();

        let parsed = LayoutDocument::parse(&bare, DocumentFormat::Json).unwrap();
        prop_assert!(needs_migration(&parsed));

        let loaded = LayoutDocument::load(&bare, DocumentFormat::Json).unwrap();
        prop_assert_eq!(loaded.schema_version, LAYOUT_SCHEMA_VERSION);
        prop_assert_eq!(loaded.layout.as_deref(), Some(tree.as_ref()));
        prop_assert!(loaded.active_tabs.is_empty());
    }

    /// Documents from a newer schema are refused rather than misread.
    #[test]
    fn prop_newer_schema_is_rejected(version in (LAYOUT_SCHEMA_VERSION + 1)..=u16::MAX) {
        let text = format!(r#"{{"schema_version":{version},"layout":null}}"#);
        prop_assert_eq!(
            LayoutDocument::load(&text, DocumentFormat::Json),
            Err(PersistenceError::UnsupportedVersion {
                found: version,
                supported: LAYOUT_SCHEMA_VERSION,
            })
        );
    }

    /// A saved session reloads from a store under the configured keys.
    #[test]
    fn prop_session_round_trip(tree in arb_tree(), format in arb_format()) {
        let mut store = MemoryLayoutStore::new();
        let keys = StorageSettings::default();
        let active: ActiveTabState = tab_groups(&tree)
            .iter()
            .map(|group| (group.id.clone(), 0))
            .collect();

        save_session(&mut store, &keys, format, Some(&tree), &active).unwrap();
        prop_assert!(store.get(&keys.layout_key).unwrap().is_some());

        let loaded = load_session(&store, &keys, format).unwrap().unwrap();
        prop_assert_eq!(loaded.layout.as_deref(), Some(tree.as_ref()));
        prop_assert_eq!(loaded.active_tabs, active);
    }
}
