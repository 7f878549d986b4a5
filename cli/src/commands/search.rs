use super::{AppContext, MarkCommand};
use crate::live_search;
use marklist::error::Result;
use marklist::SortOrder;

#[derive(Debug, Clone, Default)]
pub struct SearchCommand {
    pub query: Option<String>,
    pub order: Option<SortOrder>,
}

impl MarkCommand for SearchCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let view = ctx.load_view(ctx.order(self.order))?;
        live_search::run(ctx, view, self.query.as_deref().unwrap_or_default())
    }
}
