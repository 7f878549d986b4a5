use crate::models::record::BookmarkRecord;
use crate::pipeline::{self, SortOrder};

/// A rendered entry: the record plus its presentation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub record: BookmarkRecord,
    pub hidden: bool,
}

/// The displayed bookmark list.
///
/// Filtering only toggles `hidden` flags, so clearing the query restores the
/// exact order the list was built with, without reloading.
#[derive(Debug, Clone, Default)]
pub struct BookmarkView {
    entries: Vec<ViewEntry>,
    order: SortOrder,
    query: String,
    highlighted: Option<usize>,
}

impl BookmarkView {
    /// Build a view from records that are already in display order
    pub fn new(records: Vec<BookmarkRecord>, order: SortOrder) -> Self {
        let entries = records
            .into_iter()
            .map(|record| ViewEntry {
                record,
                hidden: false,
            })
            .collect();
        Self {
            entries,
            order,
            query: String::new(),
            highlighted: None,
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// All records in display order, hidden ones included
    pub fn records(&self) -> Vec<BookmarkRecord> {
        self.entries.iter().map(|e| e.record.clone()).collect()
    }

    /// Hide entries that don't match `query`; an empty query shows everything
    pub fn apply_filter(&mut self, query: &str) -> usize {
        let query_lower = query.to_lowercase();
        let mut visible = 0;
        for entry in &mut self.entries {
            entry.hidden = !pipeline::matches_query(&entry.record, &query_lower);
            if !entry.hidden {
                visible += 1;
            }
        }
        self.query = query.to_string();
        visible
    }

    /// Highlight the first entry whose URL equals `target`.
    ///
    /// Any previous highlight is cleared first. Hidden entries can match.
    pub fn locate(&mut self, target: &str) -> Option<usize> {
        self.highlighted = self
            .entries
            .iter()
            .position(|entry| entry.record.url == target);
        self.highlighted
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Visible entries as `(index, record, highlighted)`
    pub fn visible(&self) -> impl Iterator<Item = (usize, &BookmarkRecord, bool)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.hidden)
            .map(move |(i, entry)| (i, &entry.record, self.highlighted == Some(i)))
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.hidden).count()
    }

    pub fn get(&self, index: usize) -> Option<&BookmarkRecord> {
        self.entries.get(index).map(|e| &e.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BookmarkView {
        let records = vec![
            BookmarkRecord::new("A", "https://a.example", 100),
            BookmarkRecord::new("B", "https://b.example", 300),
            BookmarkRecord::new("C", "https://c.example", 200),
        ];
        BookmarkView::new(
            pipeline::sorted(&records, SortOrder::Descending),
            SortOrder::Descending,
        )
    }

    fn visible_titles(view: &BookmarkView) -> Vec<String> {
        view.visible().map(|(_, r, _)| r.title.clone()).collect()
    }

    #[test]
    fn test_filter_hides_without_removing() {
        let mut view = view();
        assert_eq!(view.apply_filter("b"), 1);
        assert_eq!(visible_titles(&view), vec!["B"]);
        assert_eq!(view.len(), 3);
        assert_eq!(view.query(), "b");
    }

    #[test]
    fn test_empty_filter_restores_order() {
        let mut view = view();
        let before = visible_titles(&view);

        view.apply_filter("c.example");
        assert_eq!(visible_titles(&view), vec!["C"]);

        assert_eq!(view.apply_filter(""), 3);
        assert_eq!(visible_titles(&view), before);
        assert_eq!(before, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_filter_twice_is_idempotent() {
        let mut view = view();
        view.apply_filter("EXAMPLE");
        let first: Vec<ViewEntry> = view.entries().to_vec();
        view.apply_filter("EXAMPLE");
        assert_eq!(view.entries(), first.as_slice());
    }

    #[test]
    fn test_locate_highlights_and_clears() {
        let mut view = view();
        assert_eq!(view.locate("https://a.example"), Some(2));
        let highlighted: Vec<bool> = view.visible().map(|(_, _, h)| h).collect();
        assert_eq!(highlighted, vec![false, false, true]);

        assert_eq!(view.locate("https://missing.example"), None);
        assert_eq!(view.highlighted(), None);
        assert!(view.visible().all(|(_, _, h)| !h));
    }

    #[test]
    fn test_empty_view() {
        let mut view = BookmarkView::new(Vec::new(), SortOrder::Ascending);
        assert!(view.is_empty());
        assert_eq!(view.apply_filter("x"), 0);
        assert_eq!(view.locate("https://a.example"), None);
        assert_eq!(view.order(), SortOrder::Ascending);
    }
}
