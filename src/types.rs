//! Core types for chart configurations.
//!
//! A chart configuration arrives as untrusted, loosely-typed JSON. It is held
//! as a [`ConfigValue`] tree, which differs from `serde_json::Value` only in
//! that a leaf may also be a materialized [`Formatter`].

use crate::constants::CALLABLE_TAG;
use crate::formatters::Formatter;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Ordered mapping of a configuration object
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A node of a chart configuration tree
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
    /// A formatter produced by materialization
    Callable(Formatter),
}

impl ConfigValue {
    /// Create an empty object node
    pub fn object() -> Self {
        ConfigValue::Object(ConfigMap::new())
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, ConfigValue::Callable(_))
    }

    /// Leaves are everything that is not walked into
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ConfigValue::Object(_) | ConfigValue::Array(_))
    }

    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Formatter> {
        match self {
            ConfigValue::Callable(f) => Some(f),
            _ => None,
        }
    }

    /// Look up a key on an object node
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Follow a chain of object keys
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// JavaScript truthiness, used where chart options are tested loosely
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            ConfigValue::String(s) => !s.is_empty(),
            ConfigValue::Array(_) | ConfigValue::Object(_) | ConfigValue::Callable(_) => true,
        }
    }

    /// Short name of the variant for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Object(_) => "object",
            ConfigValue::Callable(_) => "callable",
        }
    }

    /// Convert to JSON; callables become `{"$callable": "<source>"}`
    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::Null => Value::Null,
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Number(n) => Value::Number(n.clone()),
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Array(items) => Value::Array(items.iter().map(ConfigValue::to_json).collect()),
            ConfigValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            ConfigValue::Callable(f) => {
                let mut obj = serde_json::Map::new();
                obj.insert(CALLABLE_TAG.to_string(), Value::String(f.source().to_string()));
                Value::Object(obj)
            }
        }
    }

    /// Parse JSON text into a configuration tree
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => ConfigValue::Number(n),
            Value::String(s) => ConfigValue::String(s),
            Value::Array(items) => ConfigValue::Array(items.into_iter().map(ConfigValue::from).collect()),
            Value::Object(obj) => ConfigValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<Formatter> for ConfigValue {
    fn from(f: Formatter) -> Self {
        ConfigValue::Callable(f)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Object(map)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Number(n) => n.serialize(serializer),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Array(items) => serializer.collect_seq(items),
            ConfigValue::Object(map) => serializer.collect_map(map),
            ConfigValue::Callable(f) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(CALLABLE_TAG, f.source())?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ConfigValue::from)
    }
}
