use crate::{
    format::{
        json::JsonEntry, plain::PlainEntry, toml::TomlEntry, traits::BookmarkFormat,
        yaml::YamlEntry,
    },
    output::colorize::{Colorize, ColorizeEntry},
};
use marklist::date::format_timestamp;
use marklist::view::BookmarkView;
use marklist::BookmarkRecord;
use serde::Serialize;

pub mod json;
pub mod plain;
pub mod toml;
pub mod traits;
pub mod yaml;

/// A displayed entry: the record, its 1-based position and formatted date
#[derive(Debug, Clone, Serialize)]
pub struct EntryOut {
    pub position: usize,
    pub title: String,
    pub url: String,
    pub date_added: i64,
    pub date: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub highlighted: bool,
}

impl EntryOut {
    pub fn new(index: usize, record: &BookmarkRecord, highlighted: bool, date_format: &str) -> Self {
        Self {
            position: index + 1,
            title: record.title.clone(),
            url: record.url.clone(),
            date_added: record.date_added,
            date: format_timestamp(record.date_added, date_format),
            highlighted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Toml,
    Plain,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "toml" => OutputFormat::Toml,
            "plain" => OutputFormat::Plain,
            _ => OutputFormat::Colored,
        }
    }

    pub fn render_entry(self, entry: &EntryOut, no_color: bool) -> String {
        match self {
            OutputFormat::Json => JsonEntry(entry).to_string(),
            OutputFormat::Yaml => YamlEntry(entry).to_string(),
            OutputFormat::Toml => TomlEntry(entry).to_string(),
            OutputFormat::Plain => PlainEntry(entry).to_string(),
            OutputFormat::Colored => {
                if no_color {
                    PlainEntry(entry).to_string()
                } else {
                    ColorizeEntry(entry).to_colored()
                }
            }
        }
    }

    pub fn print_entries(self, entries: &[EntryOut], no_color: bool) {
        for entry in entries {
            println!("{}", self.render_entry(entry, no_color));
        }
    }
}

/// Visible entries of a view, optionally restricted to the first `limit`
pub fn visible_entries(view: &BookmarkView, date_format: &str, limit: Option<usize>) -> Vec<EntryOut> {
    view.visible()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(i, record, highlighted)| EntryOut::new(i, record, highlighted, date_format))
        .collect()
}

/// Visible entries within `radius` positions of `center`
pub fn entries_around(
    view: &BookmarkView,
    center: usize,
    radius: usize,
    date_format: &str,
) -> Vec<EntryOut> {
    let first = center.saturating_sub(radius);
    let last = center.saturating_add(radius);
    view.visible()
        .filter(|(i, _, _)| (first..=last).contains(i))
        .map(|(i, record, highlighted)| EntryOut::new(i, record, highlighted, date_format))
        .collect()
}
