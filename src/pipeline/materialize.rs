//! Expression materialization.
//!
//! Walks every mapping key and sequence element of a configuration tree and
//! replaces expression tokens with formatters:
//!
//! - a named formatter token (`"currency_mxn"`) binds the built-in formatter
//! - text starting with `function` or containing `=>` is compiled
//! - text that fails to compile stays as it was and is reported
//!
//! All other values pass through untouched.

use super::child_path;
use crate::constants::{ARROW_MARKER, FUNCTION_KEYWORD, ROOT_PATH};
use crate::formatters::{Formatter, NamedFormatter};
use crate::types::ConfigValue;
use serde::Serialize;
use tracing::error;

/// An expression token that could not be turned into a formatter
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaterializationFailure {
    /// Dotted path of the offending key, e.g. `root.yaxis.labels.formatter`
    pub path: String,
    pub expression: String,
    pub error: String,
}

/// Whether a string is a candidate for materialization
pub fn is_expression_token(value: &str) -> bool {
    let trimmed = value.trim();
    NamedFormatter::from_name(trimmed).is_some()
        || trimmed.starts_with(FUNCTION_KEYWORD)
        || trimmed.contains(ARROW_MARKER)
}

/// Materialize every expression token in `tree`.
///
/// Non-container roots are returned unchanged.
pub fn materialize(tree: ConfigValue) -> (ConfigValue, Vec<MaterializationFailure>) {
    let mut failures = Vec::new();
    let tree = match tree {
        ConfigValue::Object(_) | ConfigValue::Array(_) => visit(tree, ROOT_PATH, &mut failures),
        other => other,
    };
    (tree, failures)
}

fn visit(node: ConfigValue, path: &str, failures: &mut Vec<MaterializationFailure>) -> ConfigValue {
    match node {
        ConfigValue::Object(map) => ConfigValue::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = visit(value, &child_path(path, &key), failures);
                    (key, value)
                })
                .collect(),
        ),
        ConfigValue::Array(items) => ConfigValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, value)| visit(value, &child_path(path, &i.to_string()), failures))
                .collect(),
        ),
        ConfigValue::String(text) => materialize_string(text, path, failures),
        other => other,
    }
}

fn materialize_string(
    text: String,
    path: &str,
    failures: &mut Vec<MaterializationFailure>,
) -> ConfigValue {
    let trimmed = text.trim();

    if let Some(named) = NamedFormatter::from_name(trimmed) {
        return ConfigValue::Callable(Formatter::named(named));
    }

    if !(trimmed.starts_with(FUNCTION_KEYWORD) || trimmed.contains(ARROW_MARKER)) {
        return ConfigValue::String(text);
    }

    match Formatter::compile(trimmed) {
        Ok(formatter) => ConfigValue::Callable(formatter),
        Err(err) => {
            error!(path, expression = trimmed, error = %err, "Failed to materialize formatter");
            failures.push(MaterializationFailure {
                path: path.to_string(),
                expression: trimmed.to_string(),
                error: err.to_string(),
            });
            ConfigValue::String(text)
        }
    }
}
