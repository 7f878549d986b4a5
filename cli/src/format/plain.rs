use crate::format::traits::BookmarkFormat;
use crate::format::EntryOut;

pub struct PlainEntry<'a>(pub &'a EntryOut);

impl<'a> BookmarkFormat for PlainEntry<'a> {
    fn to_string(&self) -> String {
        let entry = self.0;
        let position = entry.position.to_string();
        let marker = if entry.highlighted { "*" } else { "" };

        let mut s = String::new();
        s.push_str(&format!("{}{}. {}\n", marker, position, entry.title));
        let padding = position.len() + marker.len() + 2;
        // padding for alignment
        s.push_str(&format!("{:>padding$} {}\n", ">", entry.url));
        s.push_str(&format!("{:>padding$} {}\n", "@", entry.date));
        s
    }
}
