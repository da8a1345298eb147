//! Render-time chart option adjustments.

use super::{child_path, with_object};
use crate::constants::ROOT_PATH;
use crate::settings::Settings;
use crate::types::{ConfigMap, ConfigValue};
use tracing::warn;

fn enabled(flag: bool) -> ConfigValue {
    let mut map = ConfigMap::new();
    map.insert("enabled".to_string(), ConfigValue::Bool(flag));
    ConfigValue::Object(map)
}

/// Adjust chart options before they reach the renderer.
///
/// A non-object `options` is treated as an empty one.
pub fn enhance_chart_options(options: ConfigValue, settings: &Settings) -> ConfigValue {
    let mut options = match options {
        ConfigValue::Object(map) => map,
        _ => ConfigMap::new(),
    };
    let path = format!("{}.options", ROOT_PATH);

    let unstacked_bar = with_object(&mut options, "chart", &path, |chart, _| {
        if settings.disable_zoom {
            chart.insert("zoom".to_string(), enabled(false));
        }
        if settings.enable_animations {
            chart.insert("animations".to_string(), enabled(true));
        }
        let is_bar = chart.get("type").and_then(ConfigValue::as_str) == Some("bar");
        let stacked = chart.get("stacked").is_some_and(ConfigValue::is_truthy);
        is_bar && !stacked
    });

    if settings.hide_bar_data_labels && unstacked_bar {
        with_object(&mut options, "dataLabels", &path, |labels, _| {
            labels.insert("enabled".to_string(), ConfigValue::Bool(false));
        });
    }

    if settings.center_titles {
        for key in ["title", "subtitle"] {
            center(&mut options, key, &path);
        }
    }

    ConfigValue::Object(options)
}

/// Center a title block. Bare strings are promoted to `{text, align}`.
fn center(options: &mut ConfigMap, key: &str, path: &str) {
    if !options.get(key).is_some_and(ConfigValue::is_truthy) {
        return;
    }
    let mut block = match options.remove(key) {
        Some(ConfigValue::String(text)) => {
            let mut map = ConfigMap::new();
            map.insert("text".to_string(), ConfigValue::String(text));
            map
        }
        Some(ConfigValue::Object(map)) => map,
        Some(other) => {
            warn!(path = %child_path(path, key), kind = other.kind(), "Replacing title block");
            ConfigMap::new()
        }
        None => return,
    };
    block.insert("align".to_string(), ConfigValue::from("center"));
    options.insert(key.to_string(), ConfigValue::Object(block));
}

/// Apply [`enhance_chart_options`] to `config.options`. Non-object configs
/// are returned unchanged.
pub fn enhance_config_options(config: ConfigValue, settings: &Settings) -> ConfigValue {
    let ConfigValue::Object(mut root) = config else {
        return config;
    };
    let options = root.remove("options").unwrap_or_default();
    root.insert("options".to_string(), enhance_chart_options(options, settings));
    ConfigValue::Object(root)
}
