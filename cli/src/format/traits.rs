/// Text rendering of a single displayed entry
pub trait BookmarkFormat {
    fn to_string(&self) -> String;
}
