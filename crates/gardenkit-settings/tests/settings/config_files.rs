use gardenkit_settings::{EditorConfig, SettingsError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("editor.toml");

    let mut config = EditorConfig::default();
    config.grid.snap_enabled = true;
    config.camera.clamp_enabled = true;
    config.tenant = "allotment-7".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");

    let mut config = EditorConfig::default();
    config.zoom.step = 1.1;
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert!((loaded.zoom.step - 1.1).abs() < 1e-12);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[grid]\nsnap_enabled = true\n").unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert!(loaded.grid.snap_enabled);
    assert_eq!(loaded.grid.step, 20.0);
    assert_eq!(loaded.history_limit, 80);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = EditorConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, EditorConfig::default());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[zoom]\nmin_scale = 3.0\nmax_scale = 2.0\n").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[zoom\nmin_scale = ").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::TomlError(_)));
}
