use crate::format::OutputFormat;
use crate::loading::{truncate, LoadingIndicator};
use marklist::config::Config;
use marklist::error::Result;
use marklist::import_export::resolve_source;
use marklist::view::BookmarkView;
use marklist::{pipeline, BookmarkRecord, SortOrder};
use std::path::Path;

pub struct AppContext<'a> {
    pub config: &'a Config,
    /// Bookmark file given on the command line
    pub source: Option<&'a Path>,
    pub browser: Option<&'a str>,
    pub format: OutputFormat,
    pub nc: bool,
    pub limit: Option<usize>,
}

impl<'a> AppContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            source: None,
            browser: None,
            format: OutputFormat::Colored,
            nc: false,
            limit: None,
        }
    }

    /// `requested`, or the configured default order
    pub fn order(&self, requested: Option<SortOrder>) -> SortOrder {
        requested.unwrap_or(self.config.default_order)
    }

    /// Fetch a fresh tree, flatten it and sort it.
    ///
    /// Every call is a separate request with its own loading indicator.
    pub fn load_records(&self, order: SortOrder) -> Result<Vec<BookmarkRecord>> {
        let source = resolve_source(self.config, self.source, self.browser)
            .inspect_err(|e| log::error!("Failed to resolve bookmark source: {}", e))?;
        let _loading =
            LoadingIndicator::start(&format!("Loading {}", truncate(&source.describe(), 60)));
        pipeline::load(source.as_ref(), order)
            .inspect_err(|e| log::error!("Failed to load {}: {}", source.describe(), e))
    }

    pub fn load_view(&self, order: SortOrder) -> Result<BookmarkView> {
        Ok(BookmarkView::new(self.load_records(order)?, order))
    }
}

pub mod import_export;
pub mod list;
pub mod locate;
pub mod misc;
pub mod search;

pub trait MarkCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn MarkCommand>)
pub enum CommandEnum {
    List(list::ListCommand),
    Locate(locate::LocateCommand),
    Export(import_export::ExportCommand),
    Copy(import_export::CopyCommand),
    Browsers(import_export::BrowsersCommand),
    Open(misc::OpenCommand),
    Search(search::SearchCommand),
    Shell(misc::ShellCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::List(cmd) => cmd.execute(ctx),
            Self::Locate(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Copy(cmd) => cmd.execute(ctx),
            Self::Browsers(cmd) => cmd.execute(ctx),
            Self::Open(cmd) => cmd.execute(ctx),
            Self::Search(cmd) => cmd.execute(ctx),
            Self::Shell(cmd) => cmd.execute(ctx),
        }
    }
}
