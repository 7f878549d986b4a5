use super::{AppContext, MarkCommand};
use marklist::clipboard::{copy_urls, ClipboardSink, SystemClipboard};
use marklist::error::Result;
use marklist::import_export::{detect_browsers, ExportFormat};
use marklist::{BookmarkRecord, SortOrder};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ExportCommand {
    pub file: Option<PathBuf>,
    pub format: Option<String>,
    pub order: Option<SortOrder>,
}

impl ExportCommand {
    /// Explicit path, or the configured file name in the working directory
    pub fn target(&self, ctx: &AppContext) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&ctx.config.export_file_name))
    }

    pub fn export_format(&self, target: &Path) -> Result<ExportFormat> {
        match self.format.as_deref() {
            Some(format) => ExportFormat::from_string(format),
            None => Ok(ExportFormat::from_path(target)),
        }
    }
}

impl MarkCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let target = self.target(ctx);
        let format = self.export_format(&target)?;
        let records = ctx.load_records(ctx.order(self.order))?;

        format
            .exporter(&ctx.config.document_title, &ctx.config.date_format)
            .export(&records, &target)?;
        eprintln!(
            "Exported {} bookmark(s) to {}",
            records.len(),
            target.display()
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CopyCommand {
    pub order: Option<SortOrder>,
}

/// Copy every URL to `sink`, reporting the outcome to the user
pub fn copy_to(sink: &mut dyn ClipboardSink, records: &[BookmarkRecord]) -> Result<usize> {
    match copy_urls(sink, records) {
        Ok(count) => {
            eprintln!("All URLs copied to clipboard");
            Ok(count)
        }
        Err(e) => {
            eprintln!("Failed to copy URLs");
            Err(e)
        }
    }
}

impl MarkCommand for CopyCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let records = ctx.load_records(ctx.order(self.order))?;
        let mut clipboard = SystemClipboard::new().inspect_err(|_| {
            eprintln!("Failed to copy URLs");
        })?;
        copy_to(&mut clipboard, &records)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowsersCommand;

impl MarkCommand for BrowsersCommand {
    fn execute(&self, _ctx: &AppContext) -> Result<()> {
        let profiles = detect_browsers();
        if profiles.is_empty() {
            eprintln!("No browser profiles detected.");
        } else {
            eprintln!("Detected browser profiles:");
            for profile in profiles {
                eprintln!("  • {}", profile.display_string());
                log::debug!("    {}", profile.path.display());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::bookmark_file;
    use marklist::clipboard::MemoryClipboard;
    use marklist::config::Config;
    use marklist::MarklistError;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case(None, "out.html", ExportFormat::Html)]
    #[case(None, "out.md", ExportFormat::Markdown)]
    #[case(Some("netscape"), "out.html", ExportFormat::Netscape)]
    fn test_export_format_choice(
        #[case] format: Option<&str>,
        #[case] file: &str,
        #[case] expected: ExportFormat,
    ) {
        let cmd = ExportCommand {
            format: format.map(str::to_string),
            ..ExportCommand::default()
        };
        assert_eq!(cmd.export_format(Path::new(file)).unwrap(), expected);
    }

    #[test]
    fn test_export_default_target() {
        let config = Config::default();
        let ctx = AppContext::new(&config);
        assert_eq!(
            ExportCommand::default().target(&ctx),
            PathBuf::from("bookmarks.html")
        );
    }

    #[test]
    fn test_export_writes_document_in_order() {
        let (dir, path) = bookmark_file();
        let config = Config::default();
        let ctx = AppContext {
            source: Some(&path),
            ..AppContext::new(&config)
        };
        let target = dir.path().join("export.html");
        let cmd = ExportCommand {
            file: Some(target.clone()),
            order: Some(SortOrder::Ascending),
            ..ExportCommand::default()
        };

        cmd.execute(&ctx).unwrap();
        let html = fs::read_to_string(&target).unwrap();
        let a = html.find("https://a.example").unwrap();
        let c = html.find("https://c.example").unwrap();
        let b = html.find("https://b.example").unwrap();
        assert!(a < c && c < b);
        assert_eq!(html.matches("<a href=").count(), 3);
    }

    #[test]
    fn test_copy_to_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        let records = vec![
            BookmarkRecord::new("A", "https://a.example", 2),
            BookmarkRecord::new("B", "https://b.example", 1),
        ];
        assert_eq!(copy_to(&mut clipboard, &records).unwrap(), 2);
        assert_eq!(clipboard.contents, "https://a.example\nhttps://b.example");
    }

    #[test]
    fn test_copy_to_failing_clipboard() {
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..MemoryClipboard::default()
        };
        let records = vec![BookmarkRecord::new("A", "https://a.example", 2)];
        assert!(matches!(
            copy_to(&mut clipboard, &records),
            Err(MarklistError::Clipboard(_))
        ));
    }
}
