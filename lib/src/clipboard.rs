//! System clipboard access.
//!
//! The clipboard is both an output sink (copying URLs) and an input for
//! locating the current page, so both directions sit behind small traits.

use crate::error::{MarklistError, Result};
use arboard::Clipboard;

/// Something that accepts text as the new clipboard contents
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Something that can report the current clipboard text
pub trait ClipboardSource {
    fn get_text(&mut self) -> Result<String>;
}

/// The real system clipboard, backed by arboard
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().map_err(|e| MarklistError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)?;
        Ok(())
    }
}

impl ClipboardSource for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.inner.get_text()?)
    }
}

/// Copy every bookmark URL, one per line, to `sink`.
///
/// Returns the number of URLs copied.
pub fn copy_urls(
    sink: &mut dyn ClipboardSink,
    records: &[crate::models::record::BookmarkRecord],
) -> Result<usize> {
    let text = crate::pipeline::to_url_text(records);
    let count = if text.is_empty() { 0 } else { text.lines().count() };
    sink.set_text(&text)?;
    log::debug!("Copied {} URL(s) to clipboard", count);
    Ok(count)
}

/// In-memory clipboard used by tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: String,
    pub fail: bool,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(MarklistError::Clipboard("clipboard unavailable".to_string()));
        }
        self.contents = text.to_string();
        Ok(())
    }
}

impl ClipboardSource for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        if self.fail {
            return Err(MarklistError::Clipboard("clipboard unavailable".to_string()));
        }
        Ok(self.contents.clone())
    }
}
