use crate::clipboard::ClipboardSource;
use crate::error::{MarklistError, Result};
use crate::utils;

pub fn open_url(url: &str) -> Result<()> {
    open::that(url).map_err(|e| MarklistError::Browser(format!("failed to open {}: {}", url, e)))?;
    Ok(())
}

/// Open `url` unless the user was selecting text when activating the entry.
///
/// Returns whether the opener was invoked.
pub fn activate<F>(url: &str, selection: &str, opener: F) -> Result<bool>
where
    F: FnOnce(&str) -> Result<()>,
{
    if !selection.is_empty() {
        log::debug!("Text selected, not opening {}", url);
        return Ok(false);
    }
    opener(url)?;
    Ok(true)
}

/// Reports the URL of the page the user is currently looking at
pub trait PageInspector {
    /// `None` when there is no active page
    fn active_url(&mut self) -> Result<Option<String>>;
}

/// A page URL given explicitly, e.g. on the command line
pub struct GivenPage(pub Option<String>);

impl PageInspector for GivenPage {
    fn active_url(&mut self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

/// Treats a URL on the clipboard as the current page
pub struct ClipboardPage<C: ClipboardSource> {
    pub clipboard: C,
}

impl<C: ClipboardSource> PageInspector for ClipboardPage<C> {
    fn active_url(&mut self) -> Result<Option<String>> {
        let text = self.clipboard.get_text()?;
        let text = text.trim();
        if utils::is_url(text) {
            Ok(Some(text.to_string()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::cell::RefCell;

    #[test]
    fn test_activate_opens_without_selection() {
        let opened = RefCell::new(Vec::new());
        let result = activate("https://a.example", "", |url| {
            opened.borrow_mut().push(url.to_string());
            Ok(())
        });
        assert!(result.unwrap());
        assert_eq!(opened.into_inner(), vec!["https://a.example"]);
    }

    #[test]
    fn test_activate_suppressed_by_selection() {
        let opened = RefCell::new(Vec::new());
        let result = activate("https://a.example", "selected words", |url| {
            opened.borrow_mut().push(url.to_string());
            Ok(())
        });
        assert!(!result.unwrap());
        assert!(opened.into_inner().is_empty());
    }

    #[test]
    fn test_activate_propagates_opener_error() {
        let result = activate("https://a.example", "", |_| {
            Err(MarklistError::Browser("no browser".to_string()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_given_page() {
        let mut page = GivenPage(Some("https://a.example".to_string()));
        assert_eq!(page.active_url().unwrap().as_deref(), Some("https://a.example"));
        assert_eq!(GivenPage(None).active_url().unwrap(), None);
    }

    #[test]
    fn test_clipboard_page() {
        let mut page = ClipboardPage {
            clipboard: MemoryClipboard {
                contents: "  https://a.example/page\n".to_string(),
                fail: false,
            },
        };
        assert_eq!(
            page.active_url().unwrap().as_deref(),
            Some("https://a.example/page")
        );

        page.clipboard.contents = "grocery list".to_string();
        assert_eq!(page.active_url().unwrap(), None);

        page.clipboard.fail = true;
        assert!(page.active_url().is_err());
    }
}
