//! Default chart toolbar.
//!
//! Ensures `options.chart.toolbar` exists with every interactive tool turned
//! on and an export entry per format. Caller export settings win over the
//! defaults; tool flags do not, the default tool set is always enabled.

use super::with_object;
use crate::constants::{EXPORT_FORMATS, ROOT_PATH, TOOLBAR_TOOLS};
use crate::settings::Settings;
use crate::types::{ConfigMap, ConfigValue};

/// Default `export` subtree: one filename entry per format
pub fn default_export(settings: &Settings) -> ConfigMap {
    EXPORT_FORMATS
        .iter()
        .map(|format| {
            let mut entry = ConfigMap::new();
            entry.insert(
                "filename".to_string(),
                ConfigValue::String(settings.export_filename.clone()),
            );
            (format.to_string(), ConfigValue::Object(entry))
        })
        .collect()
}

/// Merge the canonical toolbar into `config`. Non-object configs are
/// returned unchanged. Applying it twice equals applying it once.
pub fn apply_default_toolbar(config: ConfigValue, settings: &Settings) -> ConfigValue {
    let ConfigValue::Object(mut root) = config else {
        return config;
    };
    with_object(&mut root, "options", ROOT_PATH, |options, path| {
        with_object(options, "chart", path, |chart, path| {
            with_object(chart, "toolbar", path, |toolbar, path| {
                merge_toolbar(toolbar, path, settings);
            });
        });
    });
    ConfigValue::Object(root)
}

fn merge_toolbar(toolbar: &mut ConfigMap, path: &str, settings: &Settings) {
    toolbar.insert("show".to_string(), ConfigValue::Bool(true));

    with_object(toolbar, "tools", path, |tools, _| {
        for tool in TOOLBAR_TOOLS {
            tools.insert(tool.to_string(), ConfigValue::Bool(true));
        }
    });

    with_object(toolbar, "export", path, |export, _| {
        let caller = std::mem::take(export);
        *export = default_export(settings);
        export.extend(caller);
    });
}
