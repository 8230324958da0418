use kyobrowser::types::errors::*;

// === TabError Tests ===

#[test]
fn tab_error_not_found_display() {
    let err = TabError::NotFound("tab-123".to_string());
    assert_eq!(err.to_string(), "Tab not found: tab-123");
}

#[test]
fn tab_error_wraps_view_error() {
    let err: TabError = ViewError::Creation("no display".to_string()).into();
    assert_eq!(err.to_string(), "Tab view error: Failed to create view: no display");
    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("Failed to create view: no display"));
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === ViewError Tests ===

#[test]
fn view_error_display_variants() {
    assert_eq!(
        ViewError::Navigation("https://a.test".to_string()).to_string(),
        "Navigation failed: https://a.test"
    );
    assert_eq!(
        ViewError::Script("history.back()".to_string()).to_string(),
        "Script evaluation failed: history.back()"
    );
    assert_eq!(
        ViewError::Layout("hidden".to_string()).to_string(),
        "View layout failed: hidden"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::Io("disk full".to_string()).to_string(),
        "Bookmark I/O error: disk full"
    );
    assert_eq!(
        BookmarkError::Serialization("bad data".to_string()).to_string(),
        "Bookmark serialization error: bad data"
    );
}

// === DownloadError Tests ===

#[test]
fn download_error_display_variants() {
    assert_eq!(
        DownloadError::NotFound("https://a.test/f.zip".to_string()).to_string(),
        "Download not found: https://a.test/f.zip"
    );
    assert_eq!(
        DownloadError::FileSystemError("read-only".to_string()).to_string(),
        "Download file system error: read-only"
    );
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::IoError("denied".to_string()).to_string(),
        "Config I/O error: denied"
    );
    assert_eq!(
        ConfigError::SerializationError("line 1".to_string()).to_string(),
        "Config serialization error: line 1"
    );
}

// === ShortcutError Tests ===

#[test]
fn shortcut_error_display_variants() {
    assert_eq!(
        ShortcutError::Conflict("Ctrl+T".to_string()).to_string(),
        "Shortcut conflict: Ctrl+T"
    );
    assert_eq!(
        ShortcutError::InvalidKeys("Ctrl+".to_string()).to_string(),
        "Invalid shortcut keys: Ctrl+"
    );
}

#[test]
fn all_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TabError>();
    assert_send_sync::<ViewError>();
    assert_send_sync::<BookmarkError>();
    assert_send_sync::<DownloadError>();
    assert_send_sync::<ConfigError>();
    assert_send_sync::<ShortcutError>();
}
