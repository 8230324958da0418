use std::fmt;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// The page view backing a tab could not be created or driven.
    View(ViewError),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::View(err) => write!(f, "Tab view error: {}", err),
        }
    }
}

impl std::error::Error for TabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TabError::View(err) => Some(err),
            TabError::NotFound(_) => None,
        }
    }
}

impl From<ViewError> for TabError {
    fn from(err: ViewError) -> Self {
        TabError::View(err)
    }
}

// === ViewError ===

/// Errors reported by the embedded web engine.
#[derive(Debug)]
pub enum ViewError {
    /// The engine refused to create a view.
    Creation(String),
    /// Navigation could not be started.
    Navigation(String),
    /// Script evaluation failed (find, history navigation).
    Script(String),
    /// Showing, hiding or resizing the view failed.
    Layout(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Creation(msg) => write!(f, "Failed to create view: {}", msg),
            ViewError::Navigation(msg) => write!(f, "Navigation failed: {}", msg),
            ViewError::Script(msg) => write!(f, "Script evaluation failed: {}", msg),
            ViewError::Layout(msg) => write!(f, "View layout failed: {}", msg),
        }
    }
}

impl std::error::Error for ViewError {}

// === BookmarkError ===

/// Errors related to bookmark persistence.
#[derive(Debug)]
pub enum BookmarkError {
    /// The bookmark file could not be written.
    Io(String),
    /// The bookmark list could not be serialized.
    Serialization(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::Io(msg) => write!(f, "Bookmark I/O error: {}", msg),
            BookmarkError::Serialization(msg) => {
                write!(f, "Bookmark serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === DownloadError ===

/// Errors related to download management operations.
#[derive(Debug)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    NotFound(String),
    /// The target directory could not be prepared.
    FileSystemError(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::NotFound(id) => write!(f, "Download not found: {}", id),
            DownloadError::FileSystemError(msg) => {
                write!(f, "Download file system error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DownloadError {}

// === ConfigError ===

/// Errors related to loading the application configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    IoError(String),
    /// The config file is not valid JSON for `AppConfig`.
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// The key combination is already bound to another action.
    Conflict(String),
    /// The provided key combination is invalid.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(msg) => write!(f, "Invalid shortcut keys: {}", msg),
        }
    }
}

impl std::error::Error for ShortcutError {}
