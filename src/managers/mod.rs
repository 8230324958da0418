// KyoBrowser state managers
// Managers handle stateful operations: bookmarks, tabs, find-in-page, downloads, shortcuts.

pub mod bookmark_manager;
pub mod download_manager;
pub mod find_manager;
pub mod shortcut_manager;
pub mod tab_manager;
