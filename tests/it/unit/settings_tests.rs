//! Unit tests for settings persistence.

use answerviz::settings::{Settings, SettingsError, default_settings_path};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = Settings {
        export_filename: "reporte".to_string(),
        disable_zoom: false,
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();
    assert_eq!(Settings::load_from(&path).unwrap(), settings);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"center_titles": false}"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert!(!settings.center_titles);
    assert_eq!(settings.export_filename, "mtcenter-ventas");
    assert_eq!(settings.callback_keys, vec!["formatter", "custom"]);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{not json").unwrap();
    assert!(matches!(Settings::load_from(&path), Err(SettingsError::Json(_))));
    assert!(matches!(
        Settings::load_from(&dir.path().join("missing.json")),
        Err(SettingsError::Io(_))
    ));
}

#[test]
fn test_callback_key_rules() {
    let settings = Settings::default();
    assert!(settings.is_callback_key("formatter"));
    assert!(settings.is_callback_key("custom"));
    assert!(settings.is_callback_key("onClick"));
    assert!(!settings.is_callback_key("formatterOptions"));
    assert!(!settings.is_callback_key("labels"));
}

#[test]
fn test_default_paths() {
    let path = default_settings_path();
    assert!(path.is_some() || cfg!(target_os = "unknown"));
    if let Some(path) = path {
        assert!(path.ends_with("answerviz/settings.json"));
    }
}
