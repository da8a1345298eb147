//! Callback sanitizing.
//!
//! Last line of defense before the renderer: any leaf bound to a
//! callback-shaped key that is not a [`crate::formatters::Formatter`] is
//! removed. Objects and arrays under such keys are walked, not removed,
//! since chart options use keys like `legend.onItemClick` for settings
//! objects.

use super::child_path;
use crate::constants::ROOT_PATH;
use crate::settings::Settings;
use crate::types::{ConfigMap, ConfigValue};
use serde::Serialize;
use tracing::warn;

/// A callback key removed by the sanitizer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SanitizedCallback {
    /// Dotted path of the removed key
    pub path: String,
    pub key: String,
    /// The value that was bound to it
    pub value: serde_json::Value,
}

/// Drop every non-callable leaf bound to a callback-shaped key
pub fn sanitize_callbacks(
    tree: ConfigValue,
    settings: &Settings,
) -> (ConfigValue, Vec<SanitizedCallback>) {
    let mut removed = Vec::new();
    let tree = visit(tree, ROOT_PATH, settings, &mut removed);
    (tree, removed)
}

fn visit(
    node: ConfigValue,
    path: &str,
    settings: &Settings,
    removed: &mut Vec<SanitizedCallback>,
) -> ConfigValue {
    match node {
        ConfigValue::Object(map) => {
            let mut out = ConfigMap::new();
            for (key, value) in map {
                let path = child_path(path, &key);
                if !value.is_leaf() {
                    out.insert(key, visit(value, &path, settings, removed));
                    continue;
                }
                if settings.is_callback_key(&key) && !value.is_callable() {
                    let value = value.to_json();
                    warn!(%path, %value, "Removing invalid callback");
                    removed.push(SanitizedCallback { path, key, value });
                    continue;
                }
                out.insert(key, value);
            }
            ConfigValue::Object(out)
        }
        ConfigValue::Array(items) => ConfigValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, value)| visit(value, &child_path(path, &i.to_string()), settings, removed))
                .collect(),
        ),
        leaf => leaf,
    }
}

/// Whether `tree` still has a non-callable leaf under a callback key
pub fn has_invalid_callbacks(tree: &ConfigValue, settings: &Settings) -> bool {
    match tree {
        ConfigValue::Object(map) => map.iter().any(|(key, value)| {
            if value.is_leaf() {
                settings.is_callback_key(key) && !value.is_callable()
            } else {
                has_invalid_callbacks(value, settings)
            }
        }),
        ConfigValue::Array(items) => items.iter().any(|item| has_invalid_callbacks(item, settings)),
        _ => false,
    }
}
