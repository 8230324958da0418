//! Bookmark Manager for KyoBrowser.
//!
//! Implements `BookmarkManagerTrait`: a flat, order-preserving list of
//! bookmarks written through to a JSON file after every mutation.
//!
//! The file is a plain array of `{ "title", "url" }` objects. A file that is
//! not a JSON array is treated as "no bookmarks"; single bad records are
//! dropped without losing their neighbours.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::bookmark::{AddOutcome, Bookmark, UNTITLED};
use crate::types::errors::BookmarkError;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn list(&self) -> &[Bookmark];
    fn get(&self, index: usize) -> Option<&Bookmark>;
    fn contains(&self, url: &str) -> bool;
    fn add(&mut self, title: &str, url: &str) -> Result<AddOutcome, BookmarkError>;
    /// Removes every bookmark with this URL. Returns how many were removed.
    fn remove_by_url(&mut self, url: &str) -> Result<usize, BookmarkError>;
    /// Returns `false` when `index` is out of range.
    fn remove_by_index(&mut self, index: usize) -> Result<bool, BookmarkError>;
    /// Returns `false` when nothing changed (blank input or bad index).
    fn update(&mut self, index: usize, title: &str, url: &str) -> Result<bool, BookmarkError>;
}

/// Bookmark list backed by a JSON file.
pub struct BookmarkManager {
    path: PathBuf,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    /// Opens the store at `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bookmarks = load(&path);
        debug!(path = %path.display(), count = bookmarks.len(), "bookmarks loaded");
        Self { path, bookmarks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Persists `next` and only then adopts it, so memory and disk never
    /// disagree after a failed write.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), BookmarkError> {
        save(&self.path, &next)?;
        self.bookmarks = next;
        Ok(())
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn get(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    fn contains(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    fn add(&mut self, title: &str, url: &str) -> Result<AddOutcome, BookmarkError> {
        if self.contains(url) {
            return Ok(AddOutcome::AlreadyExists);
        }
        let mut next = self.bookmarks.clone();
        next.push(Bookmark::new(title, url));
        self.commit(next)?;
        Ok(AddOutcome::Added)
    }

    fn remove_by_url(&mut self, url: &str) -> Result<usize, BookmarkError> {
        let next: Vec<Bookmark> = self
            .bookmarks
            .iter()
            .filter(|b| b.url != url)
            .cloned()
            .collect();
        let removed = self.bookmarks.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    fn remove_by_index(&mut self, index: usize) -> Result<bool, BookmarkError> {
        if index >= self.bookmarks.len() {
            return Ok(false);
        }
        let mut next = self.bookmarks.clone();
        next.remove(index);
        self.commit(next)?;
        Ok(true)
    }

    fn update(&mut self, index: usize, title: &str, url: &str) -> Result<bool, BookmarkError> {
        let (title, url) = (title.trim(), url.trim());
        if title.is_empty() || url.is_empty() || index >= self.bookmarks.len() {
            return Ok(false);
        }
        let mut next = self.bookmarks.clone();
        next[index] = Bookmark::new(title, url);
        self.commit(next)?;
        Ok(true)
    }
}

/// Reads the bookmark file. Missing, unreadable or non-array files give an
/// empty list. Records without a URL are skipped; a missing title reads as
/// empty.
pub fn load(path: &Path) -> Vec<Bookmark> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if path.exists() {
                warn!(path = %path.display(), error = %e, "bookmark file unreadable");
            }
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "bookmark file malformed, starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Bookmark>(record) {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "skipping unreadable bookmark");
                None
            }
        })
        .collect()
}

/// Overwrites the bookmark file with `bookmarks`, pretty-printed.
pub fn save(path: &Path, bookmarks: &[Bookmark]) -> Result<(), BookmarkError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                BookmarkError::Io(format!("Failed to create bookmark directory: {}", e))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(bookmarks).map_err(|e| {
        BookmarkError::Serialization(format!("Failed to serialize bookmarks: {}", e))
    })?;

    fs::write(path, json)
        .map_err(|e| BookmarkError::Io(format!("Failed to write bookmark file: {}", e)))
}

/// Picks the title for a new bookmark: the user's (trimmed), else the
/// page's, else a placeholder.
pub fn resolve_title(user_title: Option<&str>, page_title: &str) -> String {
    [user_title.unwrap_or(""), page_title]
        .iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}
