pub mod browser;
pub mod export;
pub mod import;

use crate::config::Config;
use crate::error::{MarklistError, Result};
use std::path::Path;

// Re-export main types for convenience
pub use browser::{detect_browsers, BrowserProfile, BrowserType, ChromeSource, FirefoxSource};
pub use export::{to_html_document, BookmarkExporter, ExportFormat};
pub use import::{open_source, NetscapeSource, TreeSource};

/// Choose where bookmarks are read from.
///
/// An explicit path wins, then the configured path, then the first detected
/// profile of the requested browser (or of any browser).
pub fn resolve_source(
    config: &Config,
    path: Option<&Path>,
    browser: Option<&str>,
) -> Result<Box<dyn TreeSource>> {
    if let Some(path) = path.or(config.bookmarks_path.as_deref()) {
        log::debug!("Using bookmark file {}", path.display());
        return Ok(open_source(path));
    }

    let profiles = detect_browsers();
    select_profile(&profiles, browser.or(config.browser.as_deref())).map(|p| {
        log::debug!("Using browser profile {}", p.display_string());
        p.source()
    })
}

/// Pick the first profile matching `browser`, or the first profile at all
pub fn select_profile<'a>(
    profiles: &'a [BrowserProfile],
    browser: Option<&str>,
) -> Result<&'a BrowserProfile> {
    match browser {
        Some(name) => {
            let wanted = BrowserType::from_string(name)
                .ok_or_else(|| MarklistError::InvalidInput(format!("unknown browser '{}'", name)))?;
            profiles
                .iter()
                .find(|p| p.browser == wanted)
                .ok_or_else(|| MarklistError::NoBookmarkSource(format!(" for {}", name)))
        }
        None => profiles
            .first()
            .ok_or_else(|| MarklistError::NoBookmarkSource(String::new())),
    }
}
