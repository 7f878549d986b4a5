use crate::error::Result;
use crate::import_export::TreeSource;
use crate::models::node::BookmarkNode;
use crate::models::record::BookmarkRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order of records by the time they were added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest first
    #[serde(alias = "asc")]
    Ascending,
    /// Latest first
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl FromStr for SortOrder {
    type Err = crate::error::MarklistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(crate::error::MarklistError::InvalidInput(format!(
                "unknown sort order '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Flatten a bookmark forest into leaf records.
///
/// Folders are descended into in child order; leaves without a URL are dropped.
/// Uses an explicit stack so very deep trees cannot overflow the call stack, while
/// producing the same order as a recursive pre-order walk.
pub fn flatten(forest: &[BookmarkNode]) -> Vec<BookmarkRecord> {
    let mut records = Vec::new();
    let mut stack: Vec<&BookmarkNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        } else if let Some(url) = node.url.as_deref().filter(|u| !u.is_empty()) {
            records.push(BookmarkRecord::new(node.title.clone(), url, node.date_added));
        }
    }

    records
}

/// Sort records by `date_added` in place. The sort is stable, so records
/// sharing a timestamp keep their flatten order in either direction.
pub fn sort(records: &mut [BookmarkRecord], order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by_key(|r| r.date_added),
        SortOrder::Descending => records.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
    }
}

/// Return `records` sorted into a new vector
pub fn sorted(records: &[BookmarkRecord], order: SortOrder) -> Vec<BookmarkRecord> {
    let mut out = records.to_vec();
    sort(&mut out, order);
    out
}

/// Case-insensitive match of an already lowercased query against title or URL.
pub fn matches_query(record: &BookmarkRecord, query_lower: &str) -> bool {
    query_lower.is_empty()
        || record.title.to_lowercase().contains(query_lower)
        || record.url.to_lowercase().contains(query_lower)
}

/// Keep the records whose title or URL contains `query`, ignoring case.
/// An empty query keeps everything. Order is preserved.
pub fn filter<'a>(records: &'a [BookmarkRecord], query: &str) -> Vec<&'a BookmarkRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(r, &query))
        .collect()
}

/// Find the first record whose URL equals `target` exactly.
///
/// Returns the position and the record; `None` means the page is not bookmarked.
pub fn locate_by_url<'a>(
    records: &'a [BookmarkRecord],
    target: &str,
) -> Option<(usize, &'a BookmarkRecord)> {
    records.iter().enumerate().find(|(_, r)| r.url == target)
}

/// Join all non-empty URLs with newlines, one per bookmark
pub fn to_url_text(records: &[BookmarkRecord]) -> String {
    records
        .iter()
        .map(|r| r.url.as_str())
        .filter(|u| !u.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch a fresh tree from `source`, flatten it and sort it
pub fn load(source: &dyn TreeSource, order: SortOrder) -> Result<Vec<BookmarkRecord>> {
    let forest = source.get_tree()?;
    let mut records = flatten(&forest);
    sort(&mut records, order);
    log::debug!(
        "Loaded {} bookmarks from {} ({})",
        records.len(),
        source.describe(),
        order
    );
    Ok(records)
}
