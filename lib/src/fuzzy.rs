use crate::error::{MarklistError, Result};
use crate::models::record::BookmarkRecord;
use nucleo_picker::{Picker, Render};

/// Wrapper for rendering bookmarks in the picker.
/// Stores only the position and display string; the record is looked up after selection
struct RecordItem {
    index: usize,
    display: String,
}

impl RecordItem {
    fn new(index: usize, record: &BookmarkRecord, max_index_width: usize) -> Self {
        // Truncate URL if it's too long so the title stays visible
        let max_url_len = 80;
        let url_display: String = if record.url.chars().count() > max_url_len {
            record.url.chars().take(max_url_len).collect()
        } else {
            record.url.clone()
        };

        let display = format!(
            "\x1b[1;36m[{:>width$}]\x1b[0m {} | {}",
            index + 1,
            record.title,
            url_display,
            width = max_index_width
        );

        Self { index, display }
    }
}

/// Renderer for bookmark items
struct RecordRenderer;

impl Render<RecordItem> for RecordRenderer {
    type Str<'a> = &'a str;

    fn render<'a>(&self, item: &'a RecordItem) -> Self::Str<'a> {
        &item.display
    }
}

/// Let the user pick one record interactively; `None` when cancelled
pub fn pick_record(records: &[BookmarkRecord]) -> Result<Option<&BookmarkRecord>> {
    if records.is_empty() {
        return Ok(None);
    }

    let max_index_width = records.len().to_string().len();

    let mut picker = Picker::new(RecordRenderer);
    let injector = picker.injector();
    for (index, record) in records.iter().enumerate() {
        injector.push(RecordItem::new(index, record, max_index_width));
    }

    match picker
        .pick()
        .map_err(|e| MarklistError::FuzzySearch(e.to_string()))?
    {
        Some(item) => Ok(records.get(item.index)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_display_truncates_long_urls() {
        let long_url = format!("https://example.com/{}", "x".repeat(200));
        let record = BookmarkRecord::new("Long", long_url, 0);
        let item = RecordItem::new(4, &record, 3);

        assert!(item.display.contains("[  5]"));
        assert!(item.display.contains("Long | https://example.com/"));
        assert!(item.display.len() < 150);
        assert_eq!(item.index, 4);
    }

    #[test]
    fn test_pick_from_empty() {
        assert!(pick_record(&[]).unwrap().is_none());
    }
}
