//! Unit tests for the toolbar defaults merger.

use crate::helpers::config;
use answerviz::constants::TOOLBAR_TOOLS;
use answerviz::pipeline::{apply_default_toolbar, default_export};
use answerviz::settings::Settings;
use answerviz::types::ConfigValue;
use serde_json::json;

#[test]
fn test_toolbar_on_config_without_options() {
    let merged = apply_default_toolbar(config(json!({"series": []})), &Settings::default());
    let toolbar = merged.get_path(&["options", "chart", "toolbar"]).unwrap().to_json();
    assert_eq!(toolbar["show"], json!(true));
    assert_eq!(toolbar["tools"].as_object().unwrap().len(), TOOLBAR_TOOLS.len());
    assert_eq!(toolbar["export"]["csv"]["filename"], json!("mtcenter-ventas"));
    assert_eq!(merged.get("series"), Some(&ConfigValue::Array(vec![])));
}

#[test]
fn test_broken_intermediates_are_replaced() {
    let merged = apply_default_toolbar(
        config(json!({"options": {"chart": "bar"}})),
        &Settings::default(),
    );
    assert!(merged.get_path(&["options", "chart", "toolbar", "tools", "pan"]).is_some());
}

#[test]
fn test_caller_entries_survive() {
    let merged = apply_default_toolbar(
        config(json!({"options": {"chart": {"type": "area", "toolbar": {
            "autoSelected": "pan",
            "export": {"png": {"filename": "grafica"}, "pdf": {"filename": "x"}}
        }}}})),
        &Settings::default(),
    );
    let chart = merged.get_path(&["options", "chart"]).unwrap().to_json();
    assert_eq!(chart["type"], json!("area"));
    assert_eq!(chart["toolbar"]["autoSelected"], json!("pan"));
    assert_eq!(chart["toolbar"]["export"]["png"]["filename"], json!("grafica"));
    assert_eq!(chart["toolbar"]["export"]["pdf"]["filename"], json!("x"));
    assert_eq!(chart["toolbar"]["export"]["svg"]["filename"], json!("mtcenter-ventas"));
}

#[test]
fn test_export_filename_from_settings() {
    let settings = Settings {
        export_filename: "reporte".to_string(),
        ..Settings::default()
    };
    let export = default_export(&settings);
    assert_eq!(export.len(), 3);
    for entry in export.values() {
        assert_eq!(entry.get("filename"), Some(&ConfigValue::from("reporte")));
    }
}

#[test]
fn test_idempotent_on_arbitrary_input() {
    let settings = Settings::default();
    for raw in [
        json!({}),
        json!({"options": null}),
        json!({"options": {"chart": {"toolbar": {"tools": {"zoom": false}, "export": "csv"}}}}),
        json!("not a config"),
    ] {
        let once = apply_default_toolbar(config(raw), &settings);
        let twice = apply_default_toolbar(once.clone(), &settings);
        assert_eq!(once, twice);
    }
}
