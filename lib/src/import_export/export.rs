use crate::date::{format_timestamp, DEFAULT_DATE_FORMAT};
use crate::error::{MarklistError, Result};
use crate::models::record::BookmarkRecord;
use crate::utils::html_escape;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Default name of the exported document
pub const DEFAULT_EXPORT_FILE: &str = "bookmarks.html";

/// Default heading of the exported HTML document
pub const DEFAULT_DOCUMENT_TITLE: &str = "My Bookmarks";

/// Trait for exporting bookmarks to different formats.
///
/// Records are written in the order given; exporters never re-sort.
pub trait BookmarkExporter {
    fn render(&self, records: &[BookmarkRecord]) -> String;

    fn export(&self, records: &[BookmarkRecord], path: &Path) -> Result<()> {
        fs::write(path, self.render(records))?;
        log::debug!("Wrote {} bookmark(s) to {}", records.len(), path.display());
        Ok(())
    }
}

/// Standalone HTML page listing every bookmark with its added date
pub struct HtmlDocumentExporter {
    pub title: String,
    pub date_format: String,
}

impl Default for HtmlDocumentExporter {
    fn default() -> Self {
        Self {
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl BookmarkExporter for HtmlDocumentExporter {
    fn render(&self, records: &[BookmarkRecord]) -> String {
        let title = html_escape(&self.title);
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; }}
    .bookmark {{ margin-bottom: 10px; }}
    .bookmark a {{ color: #4299e1; text-decoration: none; }}
    .bookmark a:hover {{ text-decoration: underline; }}
    .date {{ color: #718096; font-size: 0.8em; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
"#
        );

        for record in records {
            let _ = writeln!(
                html,
                r#"  <div class="bookmark">
    <a href="{}">{}</a>
    <span class="date">({})</span>
  </div>"#,
                html_escape(&record.url),
                html_escape(&record.title),
                html_escape(&format_timestamp(record.date_added, &self.date_format)),
            );
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Render the standalone HTML document with default settings
pub fn to_html_document(records: &[BookmarkRecord]) -> String {
    HtmlDocumentExporter::default().render(records)
}

/// HTML/Netscape Bookmark File exporter, importable by browsers
pub struct NetscapeExporter;

impl BookmarkExporter for NetscapeExporter {
    fn render(&self, records: &[BookmarkRecord]) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
        out.push_str("<!-- This is an automatically generated file.\n");
        out.push_str("     It will be read and overwritten.\n");
        out.push_str("     DO NOT EDIT! -->\n");
        out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
        out.push_str("<TITLE>Bookmarks</TITLE>\n");
        out.push_str("<H1>Bookmarks</H1>\n");
        out.push_str("<DL><p>\n");

        for record in records {
            let _ = writeln!(
                out,
                "    <DT><A HREF=\"{}\" ADD_DATE=\"{}\">{}</A>",
                html_escape(&record.url),
                record.date_added / 1000,
                html_escape(&record.title)
            );
        }

        out.push_str("</DL><p>\n");
        out
    }
}

/// Markdown link list exporter
pub struct MarkdownExporter;

impl BookmarkExporter for MarkdownExporter {
    fn render(&self, records: &[BookmarkRecord]) -> String {
        let mut out = String::new();
        for record in records {
            let title = record
                .title
                .replace('\\', "\\\\")
                .replace('[', "\\[")
                .replace(']', "\\]");
            let url = record.url.replace('(', "%28").replace(')', "%29");
            let _ = writeln!(out, "- [{}]({})", title, url);
        }
        out
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Netscape,
    Markdown,
}

impl ExportFormat {
    pub fn from_string(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "netscape" => Ok(ExportFormat::Netscape),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            _ => Err(MarklistError::UnsupportedFormat(format.to_string())),
        }
    }

    /// Guess the format from a file extension, defaulting to the HTML document
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("md") | Some("markdown") => ExportFormat::Markdown,
            _ => ExportFormat::Html,
        }
    }

    pub fn exporter(self, title: &str, date_format: &str) -> Box<dyn BookmarkExporter> {
        match self {
            ExportFormat::Html => Box::new(HtmlDocumentExporter {
                title: title.to_string(),
                date_format: date_format.to_string(),
            }),
            ExportFormat::Netscape => Box::new(NetscapeExporter),
            ExportFormat::Markdown => Box::new(MarkdownExporter),
        }
    }
}
