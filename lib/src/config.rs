use crate::date::DEFAULT_DATE_FORMAT;
use crate::error::Result;
use crate::import_export::export::{DEFAULT_DOCUMENT_TITLE, DEFAULT_EXPORT_FILE};
use crate::pipeline::SortOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Order used when none is requested
    #[serde(default)]
    pub default_order: SortOrder,

    /// chrono format string for displayed and exported dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// File name used by `export` when no path is given
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Heading of the exported HTML document
    #[serde(default = "default_document_title")]
    pub document_title: String,

    /// Quiet period of the live search, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Bookmark file to read instead of auto-detecting a browser profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks_path: Option<PathBuf>,

    /// Preferred browser when auto-detecting (chrome, chromium, brave, edge, firefox)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_order: SortOrder::default(),
            date_format: default_date_format(),
            export_file_name: default_export_file_name(),
            document_title: default_document_title(),
            search_debounce_ms: default_search_debounce_ms(),
            bookmarks_path: None,
            browser: None,
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

fn default_document_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/marklist/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}; using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
