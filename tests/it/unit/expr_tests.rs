//! Unit tests for the formatter expression language.

use answerviz::expr::{ExprError, compile, evaluate};
use answerviz::formatters::Formatter;
use serde_json::{Value, json};

fn eval(src: &str, arg: Value) -> String {
    let function = compile(src).unwrap();
    evaluate(&function, &arg).unwrap()
}

// ============================================================================
// Function Shapes
// ============================================================================

#[test]
fn test_function_keyword_with_name() {
    assert_eq!(eval("function fmt(val) { return val + '%'; }", json!(15)), "15%");
}

#[test]
fn test_arrow_with_block_body() {
    let src = "(val) => { if (val > 1000) { return (val / 1000).toFixed(1) + 'k'; } else { return String(val); } }";
    assert_eq!(eval(src, json!(2500)), "2.5k");
    assert_eq!(eval(src, json!(999)), "999");
}

#[test]
fn test_extra_parameters_are_undefined() {
    assert_eq!(eval("(v, opts) => opts === undefined", json!(1)), "true");
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    assert_eq!(eval("\n   v => v * 3  \n", json!(2)), "6");
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_template_literal() {
    assert_eq!(eval("v => `${v} unidades`", json!(12)), "12 unidades");
}

#[test]
fn test_conditional_and_logical() {
    assert_eq!(eval("v => v ? 'sí' : 'no'", json!(0)), "no");
    assert_eq!(eval("v => v || 'vacío'", json!("")), "vacío");
    assert_eq!(eval("v => v && v.length", json!("abc")), "3");
}

#[test]
fn test_numeric_edge_values() {
    assert_eq!(eval("v => v * 1", json!("abc")), "NaN");
    assert_eq!(eval("v => v / 0", json!(1)), "Infinity");
    assert_eq!(eval("v => -v / 0", json!(1)), "-Infinity");
    assert_eq!(eval("v => v + 1", json!(null)), "1");
}

#[test]
fn test_named_formatter_is_callable_inside_expressions() {
    assert_eq!(eval("v => 'Total: ' + currency_mxn(v)", json!(2300)), "Total: $2,300");
}

// ============================================================================
// Sandboxing
// ============================================================================

#[test]
fn test_host_identifiers_are_rejected() {
    for (src, name) in [
        ("v => fetch(v)", "fetch"),
        ("v => eval(v)", "eval"),
        ("function (v) { return document.cookie; }", "document"),
        ("v => globalThis", "globalThis"),
        ("v => require('fs')", "require"),
    ] {
        match compile(src) {
            Err(ExprError::UnknownIdentifier { name: found, .. }) => assert_eq!(found, name, "{src}"),
            other => panic!("expected unknown identifier for {src}, got {other:?}"),
        }
    }
}

#[test]
fn test_non_functions_are_rejected() {
    assert_eq!(compile("1 + 2"), Err(ExprError::NotAFunction));
    assert!(compile("function(").is_err());
    assert!(compile("v => ").is_err());
    assert!(compile("").is_err());
}

#[test]
fn test_unsupported_operations_fall_back_instead_of_panicking() {
    let cases = [
        "v => v.constructor.constructor('return 1')()",
        "v => v.nope()",
        "v => v.a.b.c",
        "(v, w) => w()",
        "v => Math.random()",
        "v => v.repeat(1e9)",
    ];
    for src in cases {
        let formatter = Formatter::compile(src).unwrap();
        assert_eq!(formatter.call(&json!(5)), "5", "{src}");
    }
}
