use super::{AppContext, MarkCommand};
use crate::format::entries_around;
use marklist::browser::{ClipboardPage, GivenPage, PageInspector};
use marklist::clipboard::SystemClipboard;
use marklist::error::Result;
use marklist::view::BookmarkView;
use marklist::SortOrder;

/// Entries shown on each side of a located bookmark
const CONTEXT_RADIUS: usize = 2;

pub const NOT_FOUND_NOTICE: &str = "Current page was not found in bookmarks";

#[derive(Debug, Clone, Default)]
pub struct LocateCommand {
    /// Page URL; the clipboard is inspected when absent
    pub url: Option<String>,
    pub order: Option<SortOrder>,
}

/// Highlight `url` in `view`, or print the not-found notice.
///
/// Returns the highlighted index.
pub fn locate_in_view(view: &mut BookmarkView, url: Option<&str>) -> Option<usize> {
    let Some(url) = url else {
        view.clear_highlight();
        println!("{}", NOT_FOUND_NOTICE);
        return None;
    };

    let found = view.locate(url);
    match found {
        Some(index) => log::debug!("{} is bookmark #{}", url, index + 1),
        None => println!("{}", NOT_FOUND_NOTICE),
    }
    found
}

/// URL of the active page; an inspector that fails counts as no active page
pub fn active_page(inspector: &mut dyn PageInspector) -> Option<String> {
    match inspector.active_url() {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cannot inspect the active page: {}", e);
            None
        }
    }
}

/// URL on the system clipboard, if any
pub fn clipboard_page() -> Option<String> {
    match SystemClipboard::new() {
        Ok(clipboard) => active_page(&mut ClipboardPage { clipboard }),
        Err(e) => {
            log::warn!("Cannot inspect the active page: {}", e);
            None
        }
    }
}

impl LocateCommand {
    /// Locate the page reported by `inspector`
    pub fn execute_with(&self, ctx: &AppContext, inspector: &mut dyn PageInspector) -> Result<()> {
        let active = active_page(inspector);
        let mut view = ctx.load_view(ctx.order(self.order))?;

        if let Some(index) = locate_in_view(&mut view, active.as_deref()) {
            let entries = entries_around(&view, index, CONTEXT_RADIUS, &ctx.config.date_format);
            ctx.format.print_entries(&entries, ctx.nc);
        }
        Ok(())
    }
}

impl MarkCommand for LocateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let url = match &self.url {
            Some(url) => Some(url.clone()),
            None => clipboard_page(),
        };
        self.execute_with(ctx, &mut GivenPage(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::bookmark_file;
    use marklist::config::Config;
    use marklist::clipboard::MemoryClipboard;
    use marklist::BookmarkRecord;

    fn view() -> BookmarkView {
        BookmarkView::new(
            vec![
                BookmarkRecord::new("A", "https://a.example", 3),
                BookmarkRecord::new("B", "https://b.example", 2),
                BookmarkRecord::new("B again", "https://b.example", 1),
            ],
            SortOrder::Descending,
        )
    }

    #[test]
    fn test_locate_in_view_first_duplicate() {
        let mut view = view();
        assert_eq!(locate_in_view(&mut view, Some("https://b.example")), Some(1));
        assert_eq!(view.highlighted(), Some(1));
    }

    #[test]
    fn test_locate_in_view_miss_clears_previous() {
        let mut view = view();
        locate_in_view(&mut view, Some("https://a.example"));
        assert_eq!(locate_in_view(&mut view, Some("https://z.example")), None);
        assert_eq!(view.highlighted(), None);
    }

    #[test]
    fn test_locate_in_view_without_page() {
        let mut view = view();
        locate_in_view(&mut view, Some("https://a.example"));
        assert_eq!(locate_in_view(&mut view, None), None);
        assert_eq!(view.highlighted(), None);
    }

    #[test]
    fn test_locate_execute_miss_is_ok() {
        let (_dir, path) = bookmark_file();
        let config = Config::default();
        let ctx = AppContext {
            source: Some(&path),
            nc: true,
            ..AppContext::new(&config)
        };
        let cmd = LocateCommand {
            url: Some("https://not-bookmarked.example".to_string()),
            order: None,
        };
        assert!(cmd.execute(&ctx).is_ok());
    }

    #[test]
    fn test_locate_with_failing_clipboard_is_ok() {
        let (_dir, path) = bookmark_file();
        let config = Config::default();
        let ctx = AppContext {
            source: Some(&path),
            nc: true,
            ..AppContext::new(&config)
        };
        let mut page = ClipboardPage {
            clipboard: MemoryClipboard {
                fail: true,
                ..MemoryClipboard::default()
            },
        };

        assert_eq!(active_page(&mut page), None);
        assert!(LocateCommand::default().execute_with(&ctx, &mut page).is_ok());
    }

    #[test]
    fn test_locate_with_clipboard_url() {
        let mut page = ClipboardPage {
            clipboard: MemoryClipboard {
                contents: " https://b.example\n".to_string(),
                ..MemoryClipboard::default()
            },
        };
        assert_eq!(active_page(&mut page).as_deref(), Some("https://b.example"));

        let mut page = GivenPage(None);
        assert_eq!(active_page(&mut page), None);
    }
}
