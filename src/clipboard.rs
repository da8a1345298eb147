//! Clipboard transfer of rendered tables.
//!
//! Copying prefers a typed HTML write so rich-text targets receive a real
//! table, and falls back to plain text when the platform cannot take HTML.
//! Failures never propagate: the caller gets a [`CopyOutcome`].

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard does not support this content type")]
    Unsupported,
    #[error("Clipboard access denied: {0}")]
    Denied(String),
    #[error("Clipboard write failed: {0}")]
    Failed(String),
}

/// Format a successful copy ended up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFormat {
    Html,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(ClipboardFormat),
    Unsupported,
    Denied(String),
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

impl From<ClipboardError> for CopyOutcome {
    fn from(err: ClipboardError) -> Self {
        match err {
            ClipboardError::Unsupported => CopyOutcome::Unsupported,
            ClipboardError::Denied(msg) => CopyOutcome::Denied(msg),
            ClipboardError::Failed(msg) => CopyOutcome::Failed(msg),
        }
    }
}

/// Destination of a clipboard write
pub trait ClipboardSink {
    /// Whether typed HTML writes are available at all
    fn supports_html(&self) -> bool;

    /// Write `html`, with `alt_text` for targets that only read plain text
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy an HTML fragment, falling back to plain text
pub fn copy_html_to_clipboard<S: ClipboardSink + ?Sized>(sink: &mut S, html: &str) -> CopyOutcome {
    if sink.supports_html() {
        match sink.write_html(html, html) {
            Ok(()) => {
                debug!(bytes = html.len(), "Copied HTML to clipboard");
                return CopyOutcome::Copied(ClipboardFormat::Html);
            }
            Err(ClipboardError::Unsupported) => {
                debug!("HTML clipboard write unsupported, falling back to text");
            }
            Err(err) => {
                warn!(error = %err, "Failed to copy HTML to clipboard");
                return err.into();
            }
        }
    }

    match sink.write_text(html) {
        Ok(()) => {
            debug!(bytes = html.len(), "Copied text to clipboard");
            CopyOutcome::Copied(ClipboardFormat::PlainText)
        }
        Err(err) => {
            warn!(error = %err, "Failed to copy text to clipboard");
            err.into()
        }
    }
}

/// What a [`MemoryClipboard`] currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContents {
    pub html: Option<String>,
    pub text: Option<String>,
}

/// In-process clipboard for headless hosts and tests.
///
/// Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<ClipboardContents>>,
    html: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: Arc::new(Mutex::new(ClipboardContents::default())),
            html: true,
        }
    }

    /// A clipboard that only takes plain text
    pub fn text_only() -> Self {
        Self {
            html: false,
            ..Self::new()
        }
    }

    pub fn contents(&self) -> ClipboardContents {
        self.contents.lock().clone()
    }

    pub fn html(&self) -> Option<String> {
        self.contents.lock().html.clone()
    }

    pub fn text(&self) -> Option<String> {
        self.contents.lock().text.clone()
    }

    pub fn clear(&self) {
        *self.contents.lock() = ClipboardContents::default();
    }
}

impl ClipboardSink for MemoryClipboard {
    fn supports_html(&self) -> bool {
        self.html
    }

    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        if !self.html {
            return Err(ClipboardError::Unsupported);
        }
        let mut contents = self.contents.lock();
        contents.html = Some(html.to_string());
        contents.text = Some(alt_text.to_string());
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self.contents.lock();
        contents.html = None;
        contents.text = Some(text.to_string());
        Ok(())
    }
}

#[cfg(feature = "system-clipboard")]
pub use system::{copy_html_to_system_clipboard, SystemClipboard};

#[cfg(feature = "system-clipboard")]
mod system {
    use super::{copy_html_to_clipboard, ClipboardError, ClipboardSink, CopyOutcome};
    use tracing::warn;

    fn map_error(err: arboard::Error) -> ClipboardError {
        match err {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
            arboard::Error::ClipboardOccupied => ClipboardError::Denied(err.to_string()),
            other => ClipboardError::Failed(other.to_string()),
        }
    }

    /// The platform clipboard
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn new() -> Result<Self, ClipboardError> {
            let inner = arboard::Clipboard::new().map_err(map_error)?;
            Ok(Self { inner })
        }
    }

    impl ClipboardSink for SystemClipboard {
        fn supports_html(&self) -> bool {
            true
        }

        fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
            self.inner.set_html(html, Some(alt_text)).map_err(map_error)
        }

        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.inner.set_text(text).map_err(map_error)
        }
    }

    /// Open the platform clipboard and copy `html` to it
    pub fn copy_html_to_system_clipboard(html: &str) -> CopyOutcome {
        match SystemClipboard::new() {
            Ok(mut clipboard) => copy_html_to_clipboard(&mut clipboard, html),
            Err(err) => {
                warn!(error = %err, "Failed to open system clipboard");
                err.into()
            }
        }
    }
}
