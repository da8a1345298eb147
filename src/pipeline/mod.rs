//! Chart configuration pipeline.
//!
//! Turns an untrusted, partially string-encoded chart configuration into a
//! tree the chart renderer can consume:
//!
//! 1. `materialize`: expression tokens become [`crate::formatters::Formatter`]s
//! 2. `apply_default_toolbar`: the canonical toolbar subtree is merged in
//! 3. `enhance_config_options`: render-time option adjustments
//! 4. `sanitize_callbacks`: leftover non-callable callbacks are dropped
//!
//! Every stage takes the tree by value and returns a new one. Recoverable
//! problems are logged and collected in a [`PipelineReport`]; nothing in the
//! pipeline fails the render.

mod chart;
mod enhance;
mod materialize;
mod sanitize;
mod toolbar;

pub use chart::RenderableChart;
pub use enhance::*;
pub use materialize::*;
pub use sanitize::*;
pub use toolbar::*;

use crate::perf::profile_scope;
use crate::settings::Settings;
use crate::types::{ConfigMap, ConfigValue};
use serde::Serialize;
use tracing::{debug, warn};

/// What the pipeline recovered from while normalizing a configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Expressions that could not be compiled and were left as strings
    pub failures: Vec<MaterializationFailure>,
    /// Callback keys removed because they did not hold a callable
    pub removed: Vec<SanitizedCallback>,
}

impl PipelineReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.removed.is_empty()
    }
}

/// A configuration ready for the chart renderer
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedChart {
    pub config: ConfigValue,
    pub report: PipelineReport,
}

/// Run every pipeline stage over a raw configuration
pub fn normalize_chart_config(raw: ConfigValue, settings: &Settings) -> NormalizedChart {
    let (config, failures) = {
        profile_scope!("materialize");
        materialize(raw)
    };
    let config = {
        profile_scope!("toolbar");
        apply_default_toolbar(config, settings)
    };
    let config = {
        profile_scope!("enhance");
        enhance_config_options(config, settings)
    };
    let (config, removed) = {
        profile_scope!("sanitize");
        sanitize_callbacks(config, settings)
    };
    debug!(
        failures = failures.len(),
        removed = removed.len(),
        "Normalized chart configuration"
    );
    NormalizedChart {
        config,
        report: PipelineReport { failures, removed },
    }
}

/// Dotted diagnostic path of a child node
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Remove `key` from `parent` as an object, replacing anything else with an
/// empty one
pub(crate) fn take_object(parent: &mut ConfigMap, key: &str, path: &str) -> ConfigMap {
    match parent.remove(key) {
        Some(ConfigValue::Object(map)) => map,
        None | Some(ConfigValue::Null) => ConfigMap::new(),
        Some(other) => {
            warn!(
                path = %child_path(path, key),
                kind = other.kind(),
                "Replacing non-object value with an empty object"
            );
            ConfigMap::new()
        }
    }
}

/// Edit the object at `parent[key]`, creating it when missing
pub(crate) fn with_object<R>(
    parent: &mut ConfigMap,
    key: &str,
    path: &str,
    edit: impl FnOnce(&mut ConfigMap, &str) -> R,
) -> R {
    let mut map = take_object(parent, key, path);
    let result = edit(&mut map, &child_path(path, key));
    parent.insert(key.to_string(), ConfigValue::Object(map));
    result
}
