//! Markdown pipe-table extraction and HTML conversion.
//!
//! Answers embed at most one table worth copying. The extractor finds the
//! first block of a header row, a separator row and one or more data rows;
//! the converter turns that block into a bare `<table>` fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\|.*\|\s*\n\s*\|[ \-:|]+\|\s*\n(?:\s*\|.*\|\s*\n?)+")
        .expect("table pattern is valid")
});

/// Return the first pipe table in `text`, trimmed
pub fn extract_first_markdown_table(text: &str) -> Option<String> {
    TABLE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Like [`extract_first_markdown_table`], for untyped input. Non-strings
/// have no table.
pub fn extract_first_markdown_table_value(value: &Value) -> Option<String> {
    value.as_str().and_then(extract_first_markdown_table)
}

/// A parsed pipe table
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table><thead><tr>");
        for header in &self.headers {
            html.push_str("<th>");
            html.push_str(header);
            html.push_str("</th>");
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td>");
                html.push_str(cell);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Split a table line into trimmed cells, dropping the outer pipes
fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parse a table fragment. `None` when it has fewer than two lines.
///
/// The second line is taken as the separator and discarded. Data rows
/// without any non-empty cell are skipped.
pub fn parse_markdown_table(fragment: &str) -> Option<HtmlTable> {
    let lines: Vec<&str> = fragment.trim().split('\n').collect();
    if lines.len() < 2 {
        return None;
    }
    let headers = split_cells(lines[0]);
    let rows = lines[2..]
        .iter()
        .map(|line| split_cells(line))
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();
    Some(HtmlTable { headers, rows })
}

/// Convert a table fragment to HTML. Fragments of fewer than two lines are
/// returned unchanged.
pub fn markdown_table_to_html(fragment: &str) -> String {
    match parse_markdown_table(fragment) {
        Some(table) => table.to_html(),
        None => fragment.to_string(),
    }
}
