use serde::{Deserialize, Serialize};

/// A flattened bookmark: the leaf-only projection of a [`super::node::BookmarkNode`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub title: String,
    pub url: String,
    /// Milliseconds since the Unix epoch
    pub date_added: i64,
}

impl BookmarkRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, date_added: i64) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = BookmarkRecord::new("Example", "https://example.com", 1_700_000_000_000);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"url\":\"https://example.com\""));
        assert!(json.contains("\"date_added\":1700000000000"));

        let deserialized: BookmarkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
