use super::{AppContext, MarkCommand};
use crate::format::visible_entries;
use marklist::error::Result;
use marklist::view::BookmarkView;
use marklist::SortOrder;

#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    pub order: Option<SortOrder>,
    pub query: Option<String>,
}

impl ListCommand {
    pub fn view(&self, ctx: &AppContext) -> Result<BookmarkView> {
        let mut view = ctx.load_view(ctx.order(self.order))?;
        if let Some(query) = self.query.as_deref() {
            view.apply_filter(query);
        }
        Ok(view)
    }
}

impl MarkCommand for ListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let view = self.view(ctx)?;

        if view.visible_count() == 0 {
            if view.is_empty() {
                eprintln!("No bookmarks to display.");
            } else {
                eprintln!("No bookmarks match '{}'.", view.query());
            }
            return Ok(());
        }

        let entries = visible_entries(&view, &ctx.config.date_format, ctx.limit);
        ctx.format.print_entries(&entries, ctx.nc);
        Ok(())
    }
}
