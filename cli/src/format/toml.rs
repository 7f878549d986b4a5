use crate::format::traits::BookmarkFormat;
use crate::format::EntryOut;

pub struct TomlEntry<'a>(pub &'a EntryOut);

impl<'a> BookmarkFormat for TomlEntry<'a> {
    fn to_string(&self) -> String {
        toml::to_string_pretty(self.0).unwrap_or_default()
    }
}
