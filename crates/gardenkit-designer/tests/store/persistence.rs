use std::sync::Arc;

use gardenkit_core::{EventBus, PersistenceError, Point};
use gardenkit_designer::model::{ItemType, WorkspaceData};
use gardenkit_designer::persistence::{
    load_or_seed, JsonFileProvider, MemoryProvider, PersistenceProvider,
};
use gardenkit_designer::serialization::LayoutFile;
use gardenkit_designer::WorkspaceStore;
use gardenkit_settings::EditorConfig;
use tempfile::TempDir;

fn populated_store() -> WorkspaceStore {
    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()));
    store.add_item_at_world(ItemType::Bed, Point::new(100.0, 100.0));
    store.add_item_at_world(ItemType::Tree, Point::new(400.0, 200.0));
    let garden = store.active_garden_id().to_string();
    store.create_layout(&garden, "Autumn").unwrap();
    store
}

#[test]
fn test_file_provider_roundtrip() {
    let dir = TempDir::new().unwrap();
    let provider = JsonFileProvider::new(dir.path());
    let store = populated_store();
    let snapshot = store.snapshot();

    provider.save("tenant-1", &snapshot).unwrap();
    assert!(dir.path().join("tenant-1.json").exists());
    assert!(!dir.path().join("tenant-1.json.tmp").exists());

    let loaded = provider.load("tenant-1").unwrap().unwrap();
    assert_eq!(loaded, snapshot);

    let reopened = WorkspaceStore::new(loaded, &EditorConfig::default(), Arc::new(EventBus::new()));
    assert_eq!(reopened.doc(), store.doc());
    assert_eq!(reopened.layouts().len(), 2);
}

#[test]
fn test_missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    let provider = JsonFileProvider::new(dir.path().join("nested"));
    assert!(provider.load("nobody").unwrap().is_none());
}

#[test]
fn test_corrupt_file_seeds() {
    let dir = TempDir::new().unwrap();
    let provider = JsonFileProvider::new(dir.path());
    std::fs::write(provider.path_for("t"), "{ not json").unwrap();

    assert!(matches!(provider.load("t"), Err(PersistenceError::Json(_))));
    let data = load_or_seed(&provider, "t");
    assert_eq!(data.gardens.len(), 1);
    assert_eq!(data.layouts.len(), 1);
}

#[test]
fn test_newer_version_seeds() {
    let provider = MemoryProvider::new();
    let mut value = serde_json::to_value(WorkspaceData::seed()).unwrap();
    value["version"] = serde_json::json!(99);
    provider.insert_raw("t", value.to_string());

    assert!(matches!(
        provider.load("t"),
        Err(PersistenceError::UnsupportedVersion { .. })
    ));
    let data = load_or_seed(&provider, "t");
    assert_eq!(data.layouts.len(), 1);
}

#[test]
fn test_layout_file_export_import() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");
    let mut store = populated_store();
    let source = store.active_layout_id().to_string();

    store.export_layout(&source).unwrap().save_to_file(&path).unwrap();
    let file = LayoutFile::load_from_file(&path).unwrap();
    assert_eq!(file.metadata.name, "Main Layout");
    assert_eq!(file.doc.items.len(), 2);

    let garden = store.active_garden_id().to_string();
    let imported = store.import_layout(&garden, &file).unwrap();
    let doc = store.doc_of(&imported).unwrap();
    assert_eq!(doc.items.len(), 2);
    assert!(doc.items.iter().all(|i| !store.doc().items.contains(&i.id)));
}

#[test]
fn test_layout_file_from_newer_version_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");
    let store = populated_store();
    let mut file = store.export_layout(store.active_layout_id()).unwrap();
    file.version = 7;
    file.save_to_file(&path).unwrap();
    assert!(LayoutFile::load_from_file(&path).is_err());
}
