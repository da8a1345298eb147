//! Answer-level helpers: chart payloads embedded in answer text and the
//! copyable table of an answer.

use crate::clipboard::{copy_html_to_clipboard, ClipboardSink, CopyOutcome};
use crate::markdown::{extract_first_markdown_table, markdown_table_to_html, render_markdown_html};
use crate::text_utils::{extract_between_tags, remove_char_from_start_and_end};
use crate::types::ConfigValue;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("No <{0}> payload found in answer")]
    MissingTag(String),
    #[error("Invalid chart payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Chart payload must be an object, got {0}")]
    NotAnObject(&'static str),
}

/// Strip code fences and a `json` language marker around a payload
fn strip_fences(raw: &str) -> &str {
    let body = remove_char_from_start_and_end(raw.trim(), '`').trim();
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse the chart configuration embedded between `<tag>` and `</tag>`
pub fn parse_chart_payload(text: &str, tag: &str) -> Result<ConfigValue, PayloadError> {
    let raw = extract_between_tags(text, tag).ok_or_else(|| PayloadError::MissingTag(tag.to_string()))?;
    let value = ConfigValue::from_json_str(strip_fences(raw))?;
    if !value.is_object() {
        return Err(PayloadError::NotAnObject(value.kind()));
    }
    Ok(value)
}

/// The text of an answer as shown in the details view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerDocument {
    pub text: String,
}

impl AnswerDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// First pipe table in the answer
    pub fn table_markdown(&self) -> Option<String> {
        extract_first_markdown_table(&self.text)
    }

    pub fn table_html(&self) -> Option<String> {
        self.table_markdown().map(|table| markdown_table_to_html(&table))
    }

    /// Copy the answer's table as HTML. `None` when there is no table.
    pub fn copy_table<S: ClipboardSink + ?Sized>(&self, sink: &mut S) -> Option<CopyOutcome> {
        let Some(html) = self.table_html() else {
            debug!("Answer has no table to copy");
            return None;
        };
        Some(copy_html_to_clipboard(sink, &html))
    }

    pub fn body_html(&self) -> String {
        render_markdown_html(&self.text)
    }

    pub fn chart_payload(&self, tag: &str) -> Result<ConfigValue, PayloadError> {
        parse_chart_payload(&self.text, tag)
    }
}
