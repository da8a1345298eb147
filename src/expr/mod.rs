//! Sandboxed formatter expressions.
//!
//! Chart payloads carry label formatters as JavaScript source text, for
//! example `"function (val) { return val.toFixed(1) + '%'; }"` or
//! `"v => currency_mxn(v)"`. Instead of handing that text to a general
//! evaluator, this module parses a small, closed subset of the language:
//!
//! - function and arrow definitions with `const`/`let`/`var`, `if`/`else`
//!   and `return` statements
//! - literals, template strings, member access, arithmetic, comparison,
//!   logical and conditional operators
//! - a fixed set of builtins (`Math.*`, `Number`, `String`, `parseFloat`,
//!   `parseInt`, `isNaN`, `isFinite`, the named formatters) and common
//!   number/string/array methods
//!
//! Identifiers are resolved at compile time, so nothing outside that set is
//! reachable. Evaluation is step bounded and never panics.

mod ast;
mod coerce;
mod error;
mod eval;
mod lexer;
mod parser;

pub use ast::Function;
pub use coerce::{
    display_json, group_thousands, number_to_string, string_to_number, to_fixed, to_locale_string,
};
pub use error::{EvalError, EvalResult, ExprError};

use serde_json::Value;

/// Compile formatter source text
pub fn compile(source: &str) -> Result<Function, ExprError> {
    parser::parse_function(source.trim())
}

/// Apply a compiled formatter to a rendering value
pub fn evaluate(function: &Function, arg: &Value) -> EvalResult<String> {
    eval::call_function(function, arg)
}
