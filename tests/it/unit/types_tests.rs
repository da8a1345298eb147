//! Unit tests for the configuration value model.

use answerviz::formatters::{Formatter, NamedFormatter};
use answerviz::types::{ConfigMap, ConfigValue};
use serde_json::json;

#[test]
fn test_callable_serializes_with_source() {
    let mut map = ConfigMap::new();
    map.insert(
        "formatter".to_string(),
        ConfigValue::from(Formatter::named(NamedFormatter::CurrencyMxn)),
    );
    let value = ConfigValue::from(map);
    assert_eq!(serde_json::to_value(&value).unwrap(), json!({"formatter": {"$callable": "currency_mxn"}}));
    assert_eq!(value.to_json(), json!({"formatter": {"$callable": "currency_mxn"}}));
}

#[test]
fn test_compiled_callable_keeps_trimmed_source() {
    let value = ConfigValue::from(Formatter::compile("  v => v + '%'  ").unwrap());
    assert_eq!(value.to_json(), json!({"$callable": "v => v + '%'"}));
    assert!(value.is_callable());
    assert!(value.is_leaf());
    assert_eq!(value.kind(), "callable");
}

#[test]
fn test_get_path_through_non_objects() {
    let value = ConfigValue::from(json!({"a": {"b": [1, 2]}}));
    assert!(value.get_path(&["a", "b"]).is_some());
    assert_eq!(value.get_path(&["a", "b", "0"]), None);
    assert_eq!(value.get_path(&["x"]), None);
    assert_eq!(value.get_path(&[]), Some(&value));
}

#[test]
fn test_deserialize_rejects_invalid_json() {
    assert!(ConfigValue::from_json_str("{\"a\": }").is_err());
    assert_eq!(ConfigValue::from_json_str("null").unwrap(), ConfigValue::Null);
}
