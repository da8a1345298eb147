//! Unit tests for markdown table extraction and conversion.

use crate::helpers::sales_answer;
use answerviz::markdown::{
    HtmlTable, extract_first_markdown_table, extract_first_markdown_table_value,
    markdown_table_to_html, parse_markdown_table, render_markdown_html,
};
use serde_json::json;

#[test]
fn test_extracts_table_from_answer() {
    let table = extract_first_markdown_table(&sales_answer()).unwrap();
    assert!(table.starts_with("| Mes | Ventas |"));
    assert!(table.ends_with("| Mar | $1,800 |"));
    assert_eq!(table.lines().count(), 5);
}

#[test]
fn test_extract_from_untyped_values() {
    assert!(extract_first_markdown_table_value(&json!(sales_answer())).is_some());
    assert_eq!(extract_first_markdown_table_value(&json!(["| a |"])), None);
    assert_eq!(extract_first_markdown_table_value(&json!({"text": "| a |"})), None);
}

#[test]
fn test_indented_table_is_found() {
    let text = "Resumen:\n  | a | b |\n  |:--|--:|\n  | 1 | 2 |\n";
    assert_eq!(
        extract_first_markdown_table(text).as_deref(),
        Some("| a | b |\n  |:--|--:|\n  | 1 | 2 |")
    );
}

#[test]
fn test_separator_row_is_required() {
    assert_eq!(extract_first_markdown_table("| a | b |\n| 1 | 2 |\n| 3 | 4 |\n"), None);
}

#[test]
fn test_parse_structure() {
    let table = parse_markdown_table("| Mes | Ventas |\n|---|---|\n| Ene | 100 |\n| Feb | 200 |").unwrap();
    assert_eq!(
        table,
        HtmlTable {
            headers: vec!["Mes".to_string(), "Ventas".to_string()],
            rows: vec![
                vec!["Ene".to_string(), "100".to_string()],
                vec!["Feb".to_string(), "200".to_string()],
            ],
        }
    );
}

#[test]
fn test_header_and_separator_only() {
    assert_eq!(
        markdown_table_to_html("| a |\n|---|"),
        "<table><thead><tr><th>a</th></tr></thead><tbody></tbody></table>"
    );
}

#[test]
fn test_cell_text_is_verbatim() {
    let html = markdown_table_to_html("| x |\n|---|\n| **b** & <i> |");
    assert!(html.contains("<td>**b** & <i></td>"));
}

#[test]
fn test_markdown_render_keeps_table() {
    let html = render_markdown_html(&sales_answer());
    assert!(html.contains("<th>Mes</th>"));
    assert!(html.contains("Estas son las ventas"));
}
