//! Unit tests for clipboard transfer.

use crate::helpers::ScriptedClipboard;
use answerviz::clipboard::{
    ClipboardError, ClipboardFormat, CopyOutcome, MemoryClipboard, copy_html_to_clipboard,
};

const HTML: &str = "<table><thead><tr><th>a</th></tr></thead><tbody></tbody></table>";

#[test]
fn test_html_write_preferred() {
    let mut sink = ScriptedClipboard::html();
    assert_eq!(copy_html_to_clipboard(&mut sink, HTML), CopyOutcome::Copied(ClipboardFormat::Html));
    assert_eq!(sink.writes, vec![("html", HTML.to_string())]);
}

#[test]
fn test_text_when_html_not_supported() {
    let mut sink = ScriptedClipboard::default();
    assert_eq!(
        copy_html_to_clipboard(&mut sink, HTML),
        CopyOutcome::Copied(ClipboardFormat::PlainText)
    );
    assert_eq!(sink.writes, vec![("text", HTML.to_string())]);
}

#[test]
fn test_text_when_html_write_unsupported() {
    let mut sink = ScriptedClipboard::html().failing_html(ClipboardError::Unsupported);
    assert_eq!(
        copy_html_to_clipboard(&mut sink, HTML),
        CopyOutcome::Copied(ClipboardFormat::PlainText)
    );
}

#[test]
fn test_denied_html_write_is_reported() {
    let mut sink = ScriptedClipboard::html().failing_html(ClipboardError::Denied("busy".into()));
    assert_eq!(copy_html_to_clipboard(&mut sink, HTML), CopyOutcome::Denied("busy".into()));
    assert!(sink.writes.is_empty());
}

#[test]
fn test_failed_text_fallback_is_reported() {
    let mut sink = ScriptedClipboard::html()
        .failing_html(ClipboardError::Unsupported)
        .failing_text(ClipboardError::Failed("no display".into()));
    assert_eq!(
        copy_html_to_clipboard(&mut sink, HTML),
        CopyOutcome::Failed("no display".into())
    );
}

#[test]
fn test_unsupported_everywhere() {
    let mut sink = ScriptedClipboard::default().failing_text(ClipboardError::Unsupported);
    let outcome = copy_html_to_clipboard(&mut sink, HTML);
    assert_eq!(outcome, CopyOutcome::Unsupported);
    assert!(!outcome.is_copied());
}

#[test]
fn test_memory_clipboard_through_trait_object() {
    let reader = MemoryClipboard::new();
    let mut sink: Box<dyn answerviz::clipboard::ClipboardSink> = Box::new(reader.clone());
    assert!(copy_html_to_clipboard(&mut *sink, HTML).is_copied());
    assert_eq!(reader.html().as_deref(), Some(HTML));
}
