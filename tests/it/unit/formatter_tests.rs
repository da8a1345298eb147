//! Unit tests for the named formatter registry.

use answerviz::formatters::{Formatter, NamedFormatter, currency_mxn, format_mxn};
use serde_json::json;

#[test]
fn test_currency_mxn_examples() {
    assert_eq!(currency_mxn(&json!(1500)), "$1,500");
    assert_eq!(currency_mxn(&json!(42)), "$42");
    assert_eq!(currency_mxn(&json!(-1234.5)), "-$1,235");
    assert_eq!(currency_mxn(&json!(0)), "$0");
}

#[test]
fn test_currency_mxn_record_uses_y() {
    assert_eq!(currency_mxn(&json!({"x": "Ene", "y": 2300})), "$2,300");
    assert_eq!(currency_mxn(&json!({"y": "1800"})), "$1,800");
}

#[test]
fn test_currency_mxn_non_numeric_passthrough() {
    assert_eq!(currency_mxn(&json!(null)), "");
    assert_eq!(currency_mxn(&json!("N/D")), "N/D");
    assert_eq!(currency_mxn(&json!("")), "");
}

#[test]
fn test_format_mxn_grouping() {
    assert_eq!(format_mxn(1_000_000.0), "$1,000,000");
    assert_eq!(format_mxn(999.49), "$999");
    assert_eq!(format_mxn(999.5), "$1,000");
}

#[test]
fn test_named_formatter_roundtrip() {
    for named in NamedFormatter::ALL {
        assert_eq!(NamedFormatter::from_name(named.name()), Some(named));
    }
}

#[test]
fn test_formatter_never_panics_on_odd_input() {
    let formatter = Formatter::named(NamedFormatter::CurrencyMxn);
    for value in [json!([1, 2]), json!(true), json!({"z": 1}), json!(1e308)] {
        let _ = formatter.call(&value);
    }
}

#[test]
fn test_compiled_formatter_uses_argument() {
    let formatter = Formatter::compile("function (val) { return val.toFixed(1) + '%'; }").unwrap();
    assert_eq!(formatter.call(&json!(12.345)), "12.3%");
    assert_eq!(formatter.as_named(), None);
}
