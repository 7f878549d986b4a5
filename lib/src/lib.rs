pub mod browser;
pub mod clipboard;
pub mod config;
pub mod date;
pub mod debounce;
pub mod error;
pub mod fuzzy;
pub mod import_export;
pub mod models;
pub mod pipeline;
pub mod utils;
pub mod view;

// Re-export the main types for convenience
pub use error::{MarklistError, Result};
pub use models::node::BookmarkNode;
pub use models::record::BookmarkRecord;
pub use pipeline::SortOrder;
