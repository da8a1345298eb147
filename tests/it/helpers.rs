//! Test helpers and fixtures.
//!
//! - `sales_chart()` / `sales_answer()` - realistic payloads as produced by the assistant
//! - `ScriptedClipboard` - a clipboard sink whose writes fail on demand

use answerviz::clipboard::{ClipboardError, ClipboardSink};
use answerviz::types::ConfigValue;
use serde_json::{Value, json};

/// Bar chart payload with a named formatter, an arrow formatter and a
/// malformed tooltip formatter
pub fn sales_chart() -> Value {
    json!({
        "type": "bar",
        "caption": "Ventas por mes",
        "series": [{"name": "Ventas", "data": [1500, 2300, 1800]}],
        "options": {
            "chart": {"type": "bar"},
            "title": {"text": "Ventas 2024"},
            "xaxis": {"categories": ["Ene", "Feb", "Mar"]},
            "yaxis": {"labels": {"formatter": "currency_mxn"}},
            "dataLabels": {"formatter": "v => v + ' u'"},
            "tooltip": {"y": {"formatter": "function(val) { return val +"}}
        }
    })
}

pub fn config(value: Value) -> ConfigValue {
    ConfigValue::from(value)
}

pub fn sales_answer() -> String {
    [
        "Estas son las ventas del primer trimestre:",
        "",
        "| Mes | Ventas |",
        "|-----|-------:|",
        "| Ene | $1,500 |",
        "| Feb | $2,300 |",
        "| Mar | $1,800 |",
        "",
        "<chart>```json",
        r#"{"type": "line", "series": [{"name": "Ventas", "data": [1500, 2300, 1800]}], "options": {"yaxis": {"labels": {"formatter": "currency_mxn"}}}}"#,
        "```</chart>",
    ]
    .join("\n")
}

/// Clipboard sink with scripted failures, recording every successful write
#[derive(Debug, Default)]
pub struct ScriptedClipboard {
    pub html_supported: bool,
    pub html_error: Option<ClipboardError>,
    pub text_error: Option<ClipboardError>,
    pub writes: Vec<(&'static str, String)>,
}

impl ScriptedClipboard {
    pub fn html() -> Self {
        Self {
            html_supported: true,
            ..Self::default()
        }
    }

    pub fn failing_html(mut self, err: ClipboardError) -> Self {
        self.html_error = Some(err);
        self
    }

    pub fn failing_text(mut self, err: ClipboardError) -> Self {
        self.text_error = Some(err);
        self
    }
}

impl ClipboardSink for ScriptedClipboard {
    fn supports_html(&self) -> bool {
        self.html_supported
    }

    fn write_html(&mut self, html: &str, _alt_text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = self.html_error.clone() {
            return Err(err);
        }
        self.writes.push(("html", html.to_string()));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = self.text_error.clone() {
            return Err(err);
        }
        self.writes.push(("text", text.to_string()));
        Ok(())
    }
}
