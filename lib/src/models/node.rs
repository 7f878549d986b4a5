use serde::{Deserialize, Serialize};

/// A node of a browser bookmark tree: a folder (has children) or a leaf (has a URL)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BookmarkNode {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub date_added: i64,
}

impl BookmarkNode {
    /// Create a leaf node
    pub fn leaf(title: impl Into<String>, url: impl Into<String>, date_added: i64) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            children: None,
            date_added,
        }
    }

    /// Create a folder node
    pub fn folder(title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            title: title.into(),
            url: None,
            children: Some(children),
            date_added: 0,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.children.is_some()
    }
}
