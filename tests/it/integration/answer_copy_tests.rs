//! Answer text to clipboard workflows.

use crate::helpers::{ScriptedClipboard, sales_answer};
use answerviz::answer::AnswerDocument;
use answerviz::clipboard::{ClipboardError, ClipboardFormat, CopyOutcome, MemoryClipboard};
use answerviz::markdown::{extract_first_markdown_table, markdown_table_to_html};

#[test]
fn test_copy_answer_table_as_html() {
    let answer = AnswerDocument::new(sales_answer());
    let clipboard = MemoryClipboard::new();
    let mut sink = clipboard.clone();

    let outcome = answer.copy_table(&mut sink);
    assert_eq!(outcome, Some(CopyOutcome::Copied(ClipboardFormat::Html)));

    let expected = markdown_table_to_html(&extract_first_markdown_table(&sales_answer()).unwrap());
    let contents = clipboard.contents();
    assert_eq!(contents.html.as_deref(), Some(expected.as_str()));
    assert_eq!(contents.text.as_deref(), Some(expected.as_str()));
}

#[test]
fn test_copy_falls_back_to_text() {
    let answer = AnswerDocument::new(sales_answer());
    let mut sink = MemoryClipboard::text_only();
    assert_eq!(
        answer.copy_table(&mut sink),
        Some(CopyOutcome::Copied(ClipboardFormat::PlainText))
    );
    assert!(sink.text().unwrap().starts_with("<table>"));
}

#[test]
fn test_denied_copy_leaves_answer_usable() {
    let answer = AnswerDocument::new(sales_answer());
    let mut sink = ScriptedClipboard::html().failing_html(ClipboardError::Denied("not focused".into()));
    assert_eq!(
        answer.copy_table(&mut sink),
        Some(CopyOutcome::Denied("not focused".into()))
    );
    assert!(answer.body_html().contains("<table>"));
}

#[test]
fn test_answer_without_table() {
    let answer = AnswerDocument::new("Las ventas subieron 12% | sin tabla");
    let mut sink = ScriptedClipboard::html();
    assert_eq!(answer.table_markdown(), None);
    assert_eq!(answer.copy_table(&mut sink), None);
    assert!(sink.writes.is_empty());
}
