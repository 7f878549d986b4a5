/// Error type for the marklist library
///
/// Every fallible operation in the crate returns [`Result`]. Conversions from the
/// underlying crates are provided so `?` works across source, export and clipboard code.
#[derive(Debug, thiserror::Error)]
pub enum MarklistError {
    /// I/O errors (reading bookmark files, writing exports)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Firefox places database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON errors (Chromium bookmark files, JSON output)
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// Clipboard access or write failures
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Browser integration errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// Fuzzy picker errors
    #[error("Fuzzy search error: {0}")]
    FuzzySearch(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No bookmark file could be found or was configured
    #[error("No bookmark source found{0}")]
    NoBookmarkSource(String),

    /// Export format not recognised
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using MarklistError
pub type Result<T> = std::result::Result<T, MarklistError>;

impl From<String> for MarklistError {
    fn from(s: String) -> Self {
        MarklistError::Other(s)
    }
}

impl From<&str> for MarklistError {
    fn from(s: &str) -> Self {
        MarklistError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for MarklistError {
    fn from(err: serde_yaml::Error) -> Self {
        MarklistError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for MarklistError {
    fn from(err: serde_json::Error) -> Self {
        MarklistError::Json(err.to_string())
    }
}

impl From<simd_json::Error> for MarklistError {
    fn from(err: simd_json::Error) -> Self {
        MarklistError::Json(err.to_string())
    }
}

impl From<tl::ParseError> for MarklistError {
    fn from(err: tl::ParseError) -> Self {
        MarklistError::HtmlParse(err.to_string())
    }
}

impl From<arboard::Error> for MarklistError {
    fn from(err: arboard::Error) -> Self {
        MarklistError::Clipboard(err.to_string())
    }
}
