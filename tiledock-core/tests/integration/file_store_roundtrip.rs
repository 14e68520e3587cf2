//! File store round-trip integration tests
//!
//! Saves container state to a directory-backed store and restores it into a
//! fresh container, the way a host does across restarts.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use tiledock_core::persistence::{load_session, read_document, save_session, write_document};
use tiledock_core::{
    ActiveTabState, ConfigManager, DocumentFormat, FileLayoutStore, ItemId, LayoutContainer,
    LayoutDocument, LayoutNode, LayoutStore, NodeRef, PersistenceError, Renderers,
    StorageSettings,
};

fn layout() -> NodeRef {
    Arc::new(
        serde_json::from_str::<LayoutNode>(
            r#"{"id":"root","direction":"column","items":[
                {"id":"top","type":"doc","weight":2.0,"tabs":[
                    {"id":"x","type":"doc"},{"id":"y","type":"doc"},{"id":"z","type":"doc"}]},
                {"id":"bottom","type":"doc","tabs":[{"id":"w","type":"doc"}]}
            ]}"#,
        )
        .unwrap(),
    )
}

fn container(layout: Option<NodeRef>) -> LayoutContainer<&'static str> {
    let renderers = Renderers::new().with("doc", "Doc");
    LayoutContainer::new(layout, renderers.clone(), renderers).unwrap()
}

#[test]
fn test_session_survives_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let keys = StorageSettings::default();

    let mut before = container(Some(layout()));
    before.set_active_tab(&ItemId::from("top"), 2);
    let mut store = FileLayoutStore::new(temp_dir.path());
    let format = store.format();
    save_session(
        &mut store,
        &keys,
        format,
        before.layout(),
        before.active_tab_state(),
    )
    .unwrap();

    assert!(temp_dir.path().join("layout.json").exists());
    assert!(temp_dir.path().join("active-tabs.json").exists());

    // A new process opens the same directory.
    let store = FileLayoutStore::new(temp_dir.path());
    let document = load_session(&store, &keys, store.format()).unwrap().unwrap();
    let after = container(document.layout).with_active_tab_state(document.active_tabs);

    assert_eq!(
        after.layout().map(|tree| tree.as_ref()),
        before.layout().map(|tree| tree.as_ref())
    );
    assert_eq!(after.active_tab_state(), before.active_tab_state());
    assert_eq!(after.active_tab_index(&ItemId::from("top")), Some(2));
}

#[test]
fn test_stale_active_tabs_are_dropped_on_restore() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let keys = StorageSettings::default();
    let mut store = FileLayoutStore::new(temp_dir.path()).with_format(DocumentFormat::Yaml);

    let stale: ActiveTabState = [(ItemId::from("top"), 9), (ItemId::from("gone"), 1)]
        .into_iter()
        .collect();
    save_session(&mut store, &keys, DocumentFormat::Yaml, Some(&layout()), &stale).unwrap();
    assert!(temp_dir.path().join("layout.yaml").exists());

    let document = load_session(&store, &keys, DocumentFormat::Yaml).unwrap().unwrap();
    assert_eq!(document.stale_active_tabs(), 1);

    let restored = container(document.layout).with_active_tab_state(document.active_tabs);
    assert_eq!(restored.active_tab_index(&ItemId::from("top")), Some(2));
    assert_eq!(restored.active_tab_index(&ItemId::from("gone")), None);
    assert_eq!(restored.active_tab_index(&ItemId::from("bottom")), Some(0));
}

#[test]
fn test_legacy_bare_layout_file_is_migrated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("legacy.json");
    fs::write(&path, serde_json::to_string(layout().as_ref()).unwrap()).unwrap();

    let document = read_document(&path).unwrap();
    assert_eq!(document.layout.as_deref(), Some(layout().as_ref()));

    // Writing it back produces the versioned envelope.
    write_document(&path, &document).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["schema_version"], 1);
}

#[test]
fn test_corrupt_layout_file_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileLayoutStore::new(temp_dir.path());
    store.set("layout", "{ not json").unwrap();

    let result = load_session(&store, &StorageSettings::default(), DocumentFormat::Json);
    assert!(matches!(result, Err(PersistenceError::Parse(_))));
}

#[test]
fn test_layouts_dir_from_config_manager() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());
    let mut store = FileLayoutStore::new(manager.layouts_dir());

    let document = LayoutDocument::new(Some(layout()), ActiveTabState::new());
    store
        .set("workspace", &document.to_text(DocumentFormat::Json).unwrap())
        .unwrap();
    assert!(manager.layouts_dir().join("workspace.json").exists());
}
