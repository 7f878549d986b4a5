use super::import::TreeSource;
use crate::date::webkit_micros_to_millis;
use crate::error::Result;
use crate::models::node::BookmarkNode;
use rusqlite::OpenFlags;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Detected browser type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserType {
    Chrome,
    Chromium,
    Brave,
    Edge,
    Firefox,
}

impl BrowserType {
    /// Get a user-friendly display name for the browser
    pub fn display_name(&self) -> &str {
        match self {
            BrowserType::Chrome => "Chrome",
            BrowserType::Chromium => "Chromium",
            BrowserType::Brave => "Brave",
            BrowserType::Edge => "Edge",
            BrowserType::Firefox => "Firefox",
        }
    }

    /// Parse browser type from string (case-insensitive)
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chrome" => Some(BrowserType::Chrome),
            "chromium" => Some(BrowserType::Chromium),
            "brave" => Some(BrowserType::Brave),
            "edge" => Some(BrowserType::Edge),
            "firefox" => Some(BrowserType::Firefox),
            _ => None,
        }
    }
}

/// Browser profile location
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub browser: BrowserType,
    pub profile_name: String,
    pub path: PathBuf,
}

impl BrowserProfile {
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.browser.display_name(), self.profile_name)
    }

    /// Tree source reading this profile's bookmarks
    pub fn source(&self) -> Box<dyn TreeSource> {
        match self.browser {
            BrowserType::Firefox => Box::new(FirefoxSource::new(&self.path)),
            _ => Box::new(ChromeSource::new(&self.path)),
        }
    }
}

/// Common Chromium profile directories to check
const CHROMIUM_PROFILE_NAMES: [&str; 5] = [
    "Default",
    "Profile 1",
    "Profile 2",
    "Profile 3",
    "Profile 4",
];

/// Detect installed browsers and their profile locations
pub fn detect_browsers() -> Vec<BrowserProfile> {
    match std::env::var("HOME") {
        Ok(home) => detect_browsers_in(Path::new(&home)),
        Err(_) => Vec::new(),
    }
}

/// Detect browser profiles below the given home directory
pub fn detect_browsers_in(home: &Path) -> Vec<BrowserProfile> {
    let mut profiles = Vec::new();

    for (browser, base) in chromium_bases(home) {
        profiles.extend(detect_chromium_profiles(browser, &base));
    }
    profiles.extend(detect_firefox_profiles(&firefox_base(home)));

    log::debug!("Detected {} browser profile(s)", profiles.len());
    profiles
}

#[cfg(target_os = "macos")]
fn chromium_bases(home: &Path) -> Vec<(BrowserType, PathBuf)> {
    let support = home.join("Library/Application Support");
    vec![
        (BrowserType::Chrome, support.join("Google/Chrome")),
        (BrowserType::Chromium, support.join("Chromium")),
        (BrowserType::Brave, support.join("BraveSoftware/Brave-Browser")),
        (BrowserType::Edge, support.join("Microsoft Edge")),
    ]
}

#[cfg(target_os = "windows")]
fn chromium_bases(home: &Path) -> Vec<(BrowserType, PathBuf)> {
    let local = home.join("AppData\\Local");
    vec![
        (BrowserType::Chrome, local.join("Google\\Chrome\\User Data")),
        (BrowserType::Chromium, local.join("Chromium\\User Data")),
        (
            BrowserType::Brave,
            local.join("BraveSoftware\\Brave-Browser\\User Data"),
        ),
        (BrowserType::Edge, local.join("Microsoft\\Edge\\User Data")),
    ]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn chromium_bases(home: &Path) -> Vec<(BrowserType, PathBuf)> {
    let config = home.join(".config");
    vec![
        (BrowserType::Chrome, config.join("google-chrome")),
        (BrowserType::Chromium, config.join("chromium")),
        (BrowserType::Brave, config.join("BraveSoftware/Brave-Browser")),
        (BrowserType::Edge, config.join("microsoft-edge")),
    ]
}

#[cfg(target_os = "macos")]
fn firefox_base(home: &Path) -> PathBuf {
    home.join("Library/Application Support/Firefox/Profiles")
}

#[cfg(target_os = "windows")]
fn firefox_base(home: &Path) -> PathBuf {
    home.join("AppData\\Roaming\\Mozilla\\Firefox\\Profiles")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn firefox_base(home: &Path) -> PathBuf {
    home.join(".mozilla/firefox")
}

fn detect_chromium_profiles(browser: BrowserType, base_path: &Path) -> Vec<BrowserProfile> {
    if !base_path.exists() {
        return Vec::new();
    }

    CHROMIUM_PROFILE_NAMES
        .iter()
        .map(|name| (name, base_path.join(name).join("Bookmarks")))
        .filter(|(_, path)| path.exists())
        .map(|(name, path)| BrowserProfile {
            browser,
            profile_name: name.to_string(),
            path,
        })
        .collect()
}

/// Find all Firefox profile directories with places.sqlite
fn detect_firefox_profiles(base_path: &Path) -> Vec<BrowserProfile> {
    let mut profiles = Vec::new();

    let Ok(entries) = fs::read_dir(base_path) else {
        return profiles;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let places = path.join("places.sqlite");
            if places.exists() {
                let profile_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("Unknown")
                    .to_string();
                profiles.push(BrowserProfile {
                    browser: BrowserType::Firefox,
                    profile_name,
                    path: places,
                });
            }
        }
    }

    profiles.sort_by(|a, b| a.profile_name.cmp(&b.profile_name));
    profiles
}

/// Chromium bookmark structure (JSON)
#[derive(Debug, Deserialize)]
struct ChromeBookmark {
    #[serde(rename = "type")]
    node_type: String,
    name: Option<String>,
    url: Option<String>,
    date_added: Option<String>,
    children: Option<Vec<ChromeBookmark>>,
}

#[derive(Debug, Deserialize)]
struct ChromeBookmarkFile {
    roots: ChromeRoots,
}

#[derive(Debug, Deserialize)]
struct ChromeRoots {
    bookmark_bar: Option<ChromeBookmark>,
    other: Option<ChromeBookmark>,
    synced: Option<ChromeBookmark>,
}

impl ChromeBookmark {
    fn into_node(self) -> Option<BookmarkNode> {
        let date_added = self
            .date_added
            .as_deref()
            .and_then(|d| d.parse::<i64>().ok())
            .map(webkit_micros_to_millis)
            .unwrap_or(0);
        let title = self.name.unwrap_or_default();

        match self.node_type.as_str() {
            "url" => Some(BookmarkNode {
                title,
                url: self.url,
                children: None,
                date_added,
            }),
            "folder" => Some(BookmarkNode {
                title,
                url: None,
                children: Some(
                    self.children
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(ChromeBookmark::into_node)
                        .collect(),
                ),
                date_added,
            }),
            other => {
                log::warn!("Skipping bookmark node of unknown type '{}'", other);
                None
            }
        }
    }
}

/// Chromium JSON `Bookmarks` file (Chrome, Chromium, Brave, Edge)
pub struct ChromeSource {
    pub path: PathBuf,
}

impl ChromeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TreeSource for ChromeSource {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        let mut json_content = fs::read(&self.path)?;
        let chrome_data: ChromeBookmarkFile = simd_json::serde::from_slice(&mut json_content)?;
        let roots = chrome_data.roots;

        Ok([roots.bookmark_bar, roots.other, roots.synced]
            .into_iter()
            .flatten()
            .filter_map(ChromeBookmark::into_node)
            .collect())
    }

    fn describe(&self) -> String {
        format!("Chromium bookmarks {}", self.path.display())
    }
}

/// Firefox `places.sqlite` database
pub struct FirefoxSource {
    pub path: PathBuf,
}

impl FirefoxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open read-only and immutable so a running Firefox holding the lock doesn't block us
    fn open(&self) -> Result<rusqlite::Connection> {
        let path = self.path.to_string_lossy();
        let escaped = path
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('?', "%3f")
            .replace('#', "%23");
        let uri = format!("file:{}?immutable=1", escaped);
        let conn = rusqlite::Connection::open_with_flags(
            uri,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(conn)
    }
}

/// Row of moz_bookmarks joined to moz_places
struct PlacesRow {
    id: i64,
    kind: i64,
    title: Option<String>,
    date_added: Option<i64>,
    url: Option<String>,
    guid: Option<String>,
}

const TYPE_BOOKMARK: i64 = 1;
const TYPE_FOLDER: i64 = 2;
const TAGS_ROOT_GUID: &str = "tags________";

impl TreeSource for FirefoxSource {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT b.id, b.type, b.parent, b.title, b.dateAdded, p.url, b.guid
             FROM moz_bookmarks b
             LEFT JOIN moz_places p ON b.fk = p.id
             ORDER BY b.parent, b.position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                PlacesRow {
                    id: row.get(0)?,
                    kind: row.get(1)?,
                    title: row.get(3)?,
                    date_added: row.get(4)?,
                    url: row.get(5)?,
                    guid: row.get(6)?,
                },
            ))
        })?;

        let mut by_parent: HashMap<i64, Vec<PlacesRow>> = HashMap::new();
        let mut root_id = None;
        for row in rows {
            let (parent, row) = row?;
            if parent == 0 {
                root_id = Some(row.id);
            }
            by_parent.entry(parent).or_default().push(row);
        }

        let Some(root_id) = root_id else {
            return Ok(Vec::new());
        };

        // The tags root mirrors bookmarks as tag folders; skip it to avoid duplicates
        let mut tops = by_parent.remove(&root_id).unwrap_or_default();
        tops.retain(|row| row.guid.as_deref() != Some(TAGS_ROOT_GUID));

        Ok(build_places_nodes(tops, &mut by_parent))
    }

    fn describe(&self) -> String {
        format!("Firefox places {}", self.path.display())
    }
}

fn build_places_nodes(
    rows: Vec<PlacesRow>,
    by_parent: &mut HashMap<i64, Vec<PlacesRow>>,
) -> Vec<BookmarkNode> {
    let mut nodes = Vec::with_capacity(rows.len());
    for row in rows {
        // Firefox stores dateAdded in microseconds
        let date_added = row.date_added.unwrap_or(0) / 1000;
        let title = row.title.unwrap_or_default();
        match row.kind {
            TYPE_BOOKMARK => nodes.push(BookmarkNode {
                title,
                url: row.url,
                children: None,
                date_added,
            }),
            TYPE_FOLDER => {
                // remove() also guards against parent cycles in a corrupt database
                let children = by_parent.remove(&row.id).unwrap_or_default();
                nodes.push(BookmarkNode {
                    title,
                    url: None,
                    children: Some(build_places_nodes(children, by_parent)),
                    date_added,
                });
            }
            _ => {} // separators
        }
    }
    nodes
}
