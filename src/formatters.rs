//! Materialized formatters.
//!
//! A [`Formatter`] is the callable that replaces an expression token in a
//! chart configuration. It is either one of the closed set of
//! [`NamedFormatter`]s or a formatter compiled by [`crate::expr`]. Calling a
//! formatter never fails: evaluation errors fall back to the plain value.

use crate::constants::CURRENCY_MXN_TOKEN;
use crate::expr::{self, ExprError, Function, display_json, group_thousands, string_to_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Well-known formatters selected by a sentinel string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedFormatter {
    /// Mexican pesos, no decimals: `1500` -> `$1,500`
    CurrencyMxn,
}

impl NamedFormatter {
    pub const ALL: [NamedFormatter; 1] = [NamedFormatter::CurrencyMxn];

    pub fn name(self) -> &'static str {
        match self {
            NamedFormatter::CurrencyMxn => CURRENCY_MXN_TOKEN,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn apply(self, value: &Value) -> String {
        match self {
            NamedFormatter::CurrencyMxn => currency_mxn(value),
        }
    }
}

/// Format a rendering value as Mexican pesos.
///
/// - `null` gives an empty string
/// - a `{y: ...}` record formats its `y` field
/// - a non-numeric string is returned unchanged
/// - everything else is formatted with zero fraction digits
pub fn currency_mxn(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Object(record) => match record.get("y") {
            Some(y) => currency_mxn(y),
            None => display_json(value),
        },
        Value::String(s) => {
            let amount = string_to_number(s);
            if s.trim().is_empty() || !amount.is_finite() {
                s.clone()
            } else {
                format_mxn(amount)
            }
        }
        Value::Number(n) => n.as_f64().map(format_mxn).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => format_mxn(if *b { 1.0 } else { 0.0 }),
        Value::Array(_) => display_json(value),
    }
}

/// `$` prefix, `,` grouping, ties rounded away from zero
pub fn format_mxn(amount: f64) -> String {
    if !amount.is_finite() {
        return expr::number_to_string(amount);
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&digits))
}

#[derive(Clone)]
enum FormatterKind {
    Named(NamedFormatter),
    Compiled(Arc<Function>),
}

/// A callable bound into a configuration tree
#[derive(Clone)]
pub struct Formatter {
    source: Arc<str>,
    kind: FormatterKind,
}

impl Formatter {
    pub fn named(named: NamedFormatter) -> Self {
        Self {
            source: Arc::from(named.name()),
            kind: FormatterKind::Named(named),
        }
    }

    /// Compile formatter source text with the sandboxed interpreter
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        let function = expr::compile(source)?;
        Ok(Self {
            source: Arc::from(source.trim()),
            kind: FormatterKind::Compiled(Arc::new(function)),
        })
    }

    /// Text the formatter was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn as_named(&self) -> Option<NamedFormatter> {
        match self.kind {
            FormatterKind::Named(named) => Some(named),
            FormatterKind::Compiled(_) => None,
        }
    }

    /// Produce the display string for a value
    pub fn call(&self, value: &Value) -> String {
        match &self.kind {
            FormatterKind::Named(named) => named.apply(value),
            FormatterKind::Compiled(function) => {
                expr::evaluate(function, value).unwrap_or_else(|err| {
                    debug!(source = %self.source, error = %err, "Formatter fell back to plain value");
                    display_json(value)
                })
            }
        }
    }
}

impl PartialEq for Formatter {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Formatter").field(&&*self.source).finish()
    }
}
