use crate::format::traits::BookmarkFormat;
use crate::format::EntryOut;

pub struct YamlEntry<'a>(pub &'a EntryOut);

impl<'a> BookmarkFormat for YamlEntry<'a> {
    fn to_string(&self) -> String {
        serde_yaml::to_string(self.0).unwrap_or_default()
    }
}
