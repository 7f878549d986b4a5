use crate::error::Result;
use crate::models::node::BookmarkNode;
use std::path::{Path, PathBuf};

/// A provider of bookmark trees.
///
/// Every call reads the underlying store afresh; nothing is cached between calls.
pub trait TreeSource {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>>;

    /// Human readable description, used in logs and notices
    fn describe(&self) -> String;
}

/// Netscape bookmark file (the HTML format browsers export)
pub struct NetscapeSource {
    pub path: PathBuf,
}

impl NetscapeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TreeSource for NetscapeSource {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        let html = std::fs::read_to_string(&self.path)?;
        parse_netscape(&html)
    }

    fn describe(&self) -> String {
        format!("bookmark file {}", self.path.display())
    }
}

/// Folder being assembled while scanning
struct Frame {
    title: String,
    date_added: i64,
    children: Vec<BookmarkNode>,
}

impl Frame {
    fn into_node(self) -> BookmarkNode {
        BookmarkNode {
            title: self.title,
            url: None,
            children: Some(self.children),
            date_added: self.date_added,
        }
    }
}

/// Parse a Netscape bookmark document into a forest.
///
/// `<H3>` names the folder whose contents are the following `<DL>` block,
/// `</DL>` closes it and `<A>` is a bookmark. Element attributes and text are
/// read with `tl`; the nesting is tracked by scanning for the structural tags,
/// since `<DT>` and `<p>` are never closed in this format.
pub fn parse_netscape(html: &str) -> Result<Vec<BookmarkNode>> {
    // ASCII lowercasing keeps byte offsets identical to `html`
    let lower = html.to_ascii_lowercase();

    let mut frames = vec![Frame {
        title: String::new(),
        date_added: 0,
        children: Vec::new(),
    }];
    // One entry per open <DL>: whether it opened a folder frame
    let mut dl_stack: Vec<bool> = Vec::new();
    let mut pending_folder: Option<(String, i64)> = None;

    let mut pos = 0;
    while let Some(offset) = lower[pos..].find('<') {
        let start = pos + offset;
        let rest = &lower[start..];

        if starts_with_tag(rest, "<dl") {
            let opens_frame = match pending_folder.take() {
                Some((title, date_added)) => {
                    frames.push(Frame {
                        title,
                        date_added,
                        children: Vec::new(),
                    });
                    true
                }
                None => false,
            };
            dl_stack.push(opens_frame);
            pos = start + 3;
        } else if rest.starts_with("</dl") {
            flush_pending_folder(&mut pending_folder, &mut frames);
            if dl_stack.pop() == Some(true) {
                close_frame(&mut frames);
            }
            pos = start + 4;
        } else if starts_with_tag(rest, "<h3") {
            let (end, (title, attrs)) = read_element_at(html, &lower, start, "</h3>")?;
            flush_pending_folder(&mut pending_folder, &mut frames);
            pending_folder = Some((title, seconds_attr_to_millis(&attrs, "ADD_DATE")));
            pos = end;
        } else if starts_with_tag(rest, "<a") {
            let (end, (title, attrs)) = read_element_at(html, &lower, start, "</a>")?;
            flush_pending_folder(&mut pending_folder, &mut frames);
            let url = attrs.get("HREF").cloned().unwrap_or_default();
            let date_added = seconds_attr_to_millis(&attrs, "ADD_DATE");
            if let Some(frame) = frames.last_mut() {
                frame.children.push(BookmarkNode::leaf(title, url, date_added));
            }
            pos = end;
        } else {
            pos = start + 1;
        }
    }

    flush_pending_folder(&mut pending_folder, &mut frames);
    if frames.len() > 1 {
        log::warn!("Bookmark file has {} unclosed folder(s)", frames.len() - 1);
    }
    while frames.len() > 1 {
        close_frame(&mut frames);
    }

    Ok(frames.pop().map(|f| f.children).unwrap_or_default())
}

/// True when `rest` starts with `tag` followed by whitespace, `>` or `/`
fn starts_with_tag(rest: &str, tag: &str) -> bool {
    rest.starts_with(tag)
        && rest[tag.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
}

/// Tags that start the next entry
const BOUNDARY_TAGS: [&str; 5] = ["<dt", "<dd", "<dl", "<h3", "<a"];

/// End of the element opened at `start`, and whether `closing` was found.
///
/// An element whose closing tag is missing ends where the next entry or
/// list begins, so it never swallows its siblings.
fn element_end(lower: &str, start: usize, closing: &str) -> (usize, bool) {
    let body = lower[start..]
        .find('>')
        .map(|i| start + i + 1)
        .unwrap_or(lower.len());

    let mut boundary = lower.len();
    let mut pos = body;
    while let Some(offset) = lower[pos..].find('<') {
        let at = pos + offset;
        let rest = &lower[at..];
        if rest.starts_with(closing) {
            return (at + closing.len(), true);
        }
        if rest.starts_with("</dl") || BOUNDARY_TAGS.iter().any(|tag| starts_with_tag(rest, tag)) {
            boundary = at;
            break;
        }
        pos = at + 1;
    }
    (boundary, false)
}

/// Read the element at `start`, returning the offset just past it
fn read_element_at(
    html: &str,
    lower: &str,
    start: usize,
    closing: &str,
) -> Result<(usize, (String, Attributes))> {
    let (end, closed) = element_end(lower, start, closing);
    let element = if closed {
        read_element(&html[start..end])?
    } else {
        // Close it with the tag name as written, e.g. `</A>`
        let name = &html[start + 1..start + closing.len() - 2];
        read_element(&format!("{}</{}>", html[start..end].trim_end(), name))?
    };
    Ok((end, element))
}

/// A folder heading with no `<DL>` after it is an empty folder
fn flush_pending_folder(pending: &mut Option<(String, i64)>, frames: &mut [Frame]) {
    if let Some((title, date_added)) = pending.take() {
        if let Some(frame) = frames.last_mut() {
            let mut folder = BookmarkNode::folder(title, Vec::new());
            folder.date_added = date_added;
            frame.children.push(folder);
        }
    }
}

fn close_frame(frames: &mut Vec<Frame>) {
    if frames.len() < 2 {
        return;
    }
    if let Some(frame) = frames.pop() {
        let node = frame.into_node();
        if let Some(parent) = frames.last_mut() {
            parent.children.push(node);
        }
    }
}

type Attributes = std::collections::HashMap<String, String>;

/// Parse a single element with tl and return its text and upper-cased attributes
fn read_element(fragment: &str) -> Result<(String, Attributes)> {
    let dom = tl::parse(fragment, tl::ParserOptions::default())?;
    let parser = dom.parser();

    let Some(tag) = dom.nodes().iter().find_map(|node| node.as_tag()) else {
        return Ok((String::new(), Attributes::new()));
    };

    let mut attrs = Attributes::new();
    for (key, value) in tag.attributes().iter() {
        let value = value.map(|v| html_unescape(&v)).unwrap_or_default();
        attrs.insert(key.to_uppercase(), value);
    }

    let title = html_unescape(tag.inner_text(parser).trim());
    Ok((title, attrs))
}

fn seconds_attr_to_millis(attrs: &Attributes, name: &str) -> i64 {
    attrs
        .get(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|secs| secs.saturating_mul(1000))
        .unwrap_or(0)
}

/// Decode named and numeric character references in a single pass.
///
/// Decoded text is never rescanned, so `&amp;lt;` stays `&lt;`.
fn html_unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest[1..]
            .find(';')
            .filter(|&len| len <= MAX_ENTITY_LEN)
            .and_then(|len| decode_entity(&rest[1..len + 1]).map(|c| (c, len + 2)));
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Longest reference name between `&` and `;`, e.g. `#x10FFFF`
const MAX_ENTITY_LEN: usize = 10;

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Pick a tree source for a bookmark file by its name and extension.
///
/// `.html`/`.htm` are Netscape files, `.sqlite` is a Firefox places database,
/// anything else is read as a Chromium `Bookmarks` JSON file.
pub fn open_source(path: &Path) -> Box<dyn TreeSource> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "html" | "htm" => Box::new(NetscapeSource::new(path)),
        "sqlite" => Box::new(super::browser::FirefoxSource::new(path)),
        _ => Box::new(super::browser::ChromeSource::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::flatten;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_html(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[rstest]
    #[case(
        r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DL><p>
    <DT><A HREF="https://example.com" ADD_DATE="1700000000">Example</A>
</DL><p>"#,
        1,
        "https://example.com",
        "Example"
    )]
    #[case(
        r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<dl><p>
    <dt><a href="https://rust-lang.org">Rust</a>
    <dt><a href="https://github.com">GitHub</a>
</dl><p>"#,
        2,
        "https://rust-lang.org",
        "Rust"
    )]
    fn test_parse_basic_bookmarks(
        #[case] html: &str,
        #[case] expected_count: usize,
        #[case] expected_url: &str,
        #[case] expected_title: &str,
    ) {
        let forest = parse_netscape(html).unwrap();
        let records = flatten(&forest);
        assert_eq!(records.len(), expected_count);
        assert_eq!(records[0].url, expected_url);
        assert_eq!(records[0].title, expected_title);
    }

    #[test]
    fn test_parse_nested_folders() {
        let html = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1600000000">Work</H3>
    <DL><p>
        <DT><A HREF="https://work.example.com" ADD_DATE="1700000000">Work Site</A>
        <DT><H3>Deep</H3>
        <DL><p>
            <DT><A HREF="https://deep.example.com">Deep Site</A>
        </DL><p>
    </DL><p>
    <DT><H3>Empty</H3>
    <DT><A HREF="https://top.example.com">Top</A>
</DL><p>"#;

        let forest = parse_netscape(html).unwrap();
        assert_eq!(forest.len(), 3);

        let work = &forest[0];
        assert_eq!(work.title, "Work");
        assert_eq!(work.date_added, 1_600_000_000_000);
        let work_children = work.children.as_ref().unwrap();
        assert_eq!(work_children.len(), 2);
        assert_eq!(work_children[0].date_added, 1_700_000_000_000);
        assert_eq!(work_children[1].title, "Deep");

        assert_eq!(forest[1].title, "Empty");
        assert_eq!(forest[1].children.as_ref().map(Vec::len), Some(0));
        assert_eq!(forest[2].url.as_deref(), Some("https://top.example.com"));

        let titles: Vec<String> = flatten(&forest).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Work Site", "Deep Site", "Top"]);
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let html = r#"<DL><p>
<DT><A HREF="https://example.com/?a=1&amp;b=2">Tom &amp; Jerry &lt;3</A>
</DL>"#;
        let records = flatten(&parse_netscape(html).unwrap());
        assert_eq!(records[0].url, "https://example.com/?a=1&b=2");
        assert_eq!(records[0].title, "Tom & Jerry <3");
    }

    #[rstest]
    #[case(
        r#"<A HREF="https://a.example/?x=1&#38;y=2">It&#8217;s &#x2F; here</A>"#,
        "It\u{2019}s / here",
        "https://a.example/?x=1&y=2"
    )]
    #[case(
        r#"<A HREF="https://b.example/?q=&#X41;&amp;r=1">&lt;b&gt; &amp;lt; &#39;x&#39;</A>"#,
        "<b> &lt; 'x'",
        "https://b.example/?q=A&r=1"
    )]
    #[case(
        r#"<A HREF="https://c.example/?a&b">AT&T &#xZZ; &#1114112; &unknown;</A>"#,
        "AT&T &#xZZ; &#1114112; &unknown;",
        "https://c.example/?a&b"
    )]
    fn test_parse_decodes_character_references(
        #[case] anchor: &str,
        #[case] expected_title: &str,
        #[case] expected_url: &str,
    ) {
        let html = format!("<DL><p>\n<DT>{}\n</DL>", anchor);
        let records = flatten(&parse_netscape(&html).unwrap());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, expected_title);
        assert_eq!(records[0].url, expected_url);
    }

    #[test]
    fn test_parse_unclosed_anchor_keeps_siblings() {
        let html = r#"<DL><p>
    <DT><A HREF="https://first.example">First
    <DT><A HREF="https://second.example">Second</A>
    <DT><A HREF="https://third.example">Third</A>
</DL>"#;
        let records = flatten(&parse_netscape(html).unwrap());
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://first.example", "https://second.example", "https://third.example"]
        );
        assert_eq!(records[0].title, "First");
        assert_eq!(records[1].title, "Second");
        assert_eq!(records[2].title, "Third");
    }

    #[test]
    fn test_parse_ignores_address_and_abbr_tags() {
        let html = r#"<DL><p>
<DT><A HREF="https://a.example">A</A>
<DD><abbr>x</abbr> <address>y</address>
</DL>"#;
        let records = flatten(&parse_netscape(html).unwrap());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_unclosed_folder() {
        let html = r#"<DL><p>
<DT><H3>Open</H3>
<DL><p>
<DT><A HREF="https://inside.example">Inside</A>"#;
        let forest = parse_netscape(html).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "Open");
        assert_eq!(flatten(&forest).len(), 1);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_netscape("").unwrap().is_empty());
    }

    #[test]
    fn test_netscape_source_reads_file() {
        let file = create_temp_html(
            r#"<DL><p><DT><A HREF="https://file.example" ADD_DATE="10">File</A></DL>"#,
        );
        let source = NetscapeSource::new(file.path());
        let forest = source.get_tree().unwrap();
        assert_eq!(forest, vec![BookmarkNode::leaf("File", "https://file.example", 10_000)]);
        assert!(source.describe().contains("bookmark file"));
    }

    #[test]
    fn test_netscape_source_missing_file() {
        let source = NetscapeSource::new("/nonexistent/bookmarks.html");
        assert!(source.get_tree().is_err());
    }

    #[rstest]
    #[case("export.html", "bookmark file")]
    #[case("EXPORT.HTM", "bookmark file")]
    #[case("places.sqlite", "Firefox")]
    #[case("Bookmarks", "Chromium")]
    fn test_open_source_by_extension(#[case] name: &str, #[case] expected: &str) {
        let source = open_source(Path::new(name));
        assert!(
            source.describe().contains(expected),
            "{} -> {}",
            name,
            source.describe()
        );
    }
}
