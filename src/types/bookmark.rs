use serde::{Deserialize, Serialize};

/// Placeholder title used when neither the user nor the page supplies one.
pub const UNTITLED: &str = "untitled";

/// A saved page reference. Bookmarks are identified by their URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Result of asking the store to add a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}
