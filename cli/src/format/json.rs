use crate::format::traits::BookmarkFormat;
use crate::format::EntryOut;

pub struct JsonEntry<'a>(pub &'a EntryOut);

impl<'a> BookmarkFormat for JsonEntry<'a> {
    fn to_string(&self) -> String {
        serde_json::to_string_pretty(self.0).unwrap_or_default()
    }
}
