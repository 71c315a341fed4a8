/// Data structures for the active browser tab
use serde::{Deserialize, Serialize};

/// Longest URL shown in the popup before it is shortened
pub const MAX_DISPLAY_URL_CHARS: usize = 40;

/// Information about the active browser tab
///
/// `url` is absent for tabs the extension is not allowed to inspect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
}

impl TabInfo {
    pub fn new(id: i32, url: Option<String>, title: String) -> TabInfo {
        TabInfo { id, url, title }
    }

    /// Hostname of the tab's URL, if it parses
    pub fn host(&self) -> Option<String> {
        let url = url::Url::parse(self.url.as_deref()?).ok()?;
        url.host_str().map(|h| h.to_lowercase())
    }
}

/// Only pages fetched over http(s) can be analyzed; browser-internal and
/// local pages (chrome://, file://, about:) are rejected.
pub fn is_analyzable_url(url: &str) -> bool {
    url.starts_with("http")
}

/// Shorten a URL for display: anything longer than 40 characters keeps its
/// first 37 characters followed by "..."
pub fn display_url(url: &str) -> String {
    if url.chars().count() > MAX_DISPLAY_URL_CHARS {
        let head: String = url.chars().take(MAX_DISPLAY_URL_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
