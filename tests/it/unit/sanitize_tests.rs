//! Unit tests for the callback sanitizer.

use crate::helpers::config;
use answerviz::pipeline::{has_invalid_callbacks, materialize, sanitize_callbacks};
use answerviz::settings::Settings;
use serde_json::json;

#[test]
fn test_clean_tree_is_noop() {
    let settings = Settings::default();
    let (tree, _) = materialize(config(json!({
        "yaxis": {"labels": {"formatter": "currency_mxn"}},
        "chart": {"events": {"click": "ignored"}}
    })));
    let (clean, removed) = sanitize_callbacks(tree.clone(), &settings);
    assert_eq!(clean, tree);
    assert!(removed.is_empty());
}

#[test]
fn test_removes_leaf_callbacks_at_any_depth() {
    let settings = Settings::default();
    let tree = config(json!({
        "options": {
            "yaxis": [{"labels": {"formatter": "function("}}],
            "tooltip": {"custom": 42},
            "chart": {"events": {"onMounted": "mounted()"}}
        }
    }));
    let (clean, removed) = sanitize_callbacks(tree, &settings);

    let paths: Vec<&str> = removed.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "root.options.chart.events.onMounted",
            "root.options.tooltip.custom",
            "root.options.yaxis.0.labels.formatter",
        ]
    );
    assert!(!has_invalid_callbacks(&clean, &settings));
    assert_eq!(clean.to_json(), json!({
        "options": {
            "yaxis": [{"labels": {}}],
            "tooltip": {},
            "chart": {"events": {}}
        }
    }));
}

#[test]
fn test_mappings_under_callback_keys_are_walked() {
    let tree = config(json!({"legend": {"onItemClick": {"toggleDataSeries": true, "formatter": "x"}}}));
    let (clean, removed) = sanitize_callbacks(tree, &Settings::default());
    assert_eq!(clean.to_json(), json!({"legend": {"onItemClick": {"toggleDataSeries": true}}}));
    assert_eq!(removed.len(), 1);
}

#[test]
fn test_custom_callback_rules() {
    let settings = Settings {
        callback_keys: vec!["renderer".to_string()],
        callback_prefixes: vec![],
        ..Settings::default()
    };
    let tree = config(json!({"renderer": "x", "formatter": "kept", "onClick": "kept"}));
    let (clean, removed) = sanitize_callbacks(tree, &settings);
    assert_eq!(clean.to_json(), json!({"formatter": "kept", "onClick": "kept"}));
    assert_eq!(removed[0].key, "renderer");
}
