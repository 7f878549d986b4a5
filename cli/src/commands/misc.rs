use super::{AppContext, MarkCommand};
use crate::interactive;
use marklist::browser::{activate, open_url};
use marklist::error::Result;
use marklist::{fuzzy, pipeline, BookmarkRecord, SortOrder};

#[derive(Debug, Clone, Default)]
pub struct OpenCommand {
    /// Narrows the candidates before the picker opens
    pub query: Option<String>,
    pub order: Option<SortOrder>,
}

/// Records matching `query`, all of them when there is none
pub fn candidates(records: &[BookmarkRecord], query: Option<&str>) -> Vec<BookmarkRecord> {
    match query {
        Some(query) => pipeline::filter(records, query).into_iter().cloned().collect(),
        None => records.to_vec(),
    }
}

impl MarkCommand for OpenCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let records = ctx.load_records(ctx.order(self.order))?;
        let candidates = candidates(&records, self.query.as_deref());
        if candidates.is_empty() {
            eprintln!("No bookmarks to open.");
            return Ok(());
        }

        match fuzzy::pick_record(&candidates)? {
            Some(record) => {
                eprintln!("Opening: {}", record.url);
                activate(&record.url, "", open_url)?;
            }
            None => log::debug!("Picker closed without a selection"),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellCommand {
    pub order: Option<SortOrder>,
}

impl MarkCommand for ShellCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        interactive::run(ctx, ctx.order(self.order))
    }
}
