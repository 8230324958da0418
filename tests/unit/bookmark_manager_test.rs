//! Unit tests for the BookmarkManager public API.
//!
//! These tests exercise the JSON-backed store through the
//! `BookmarkManagerTrait` interface, using temporary directories.

use std::fs;

use kyobrowser::managers::bookmark_manager::{self, BookmarkManager, BookmarkManagerTrait};
use kyobrowser::types::bookmark::{AddOutcome, Bookmark};
use kyobrowser::types::errors::BookmarkError;
use tempfile::TempDir;

/// Helper: a store rooted in a fresh temporary directory.
fn setup() -> (TempDir, BookmarkManager) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mgr = BookmarkManager::open(dir.path().join("bookmarks.json"));
    (dir, mgr)
}

#[test]
fn test_missing_file_loads_empty() {
    let (_dir, mgr) = setup();
    assert!(mgr.is_empty());
    assert!(!mgr.path().exists());
}

#[test]
fn test_add_persists_pretty_json() {
    let (_dir, mut mgr) = setup();
    assert_eq!(mgr.add("Example", "https://example.com").unwrap(), AddOutcome::Added);

    let content = fs::read_to_string(mgr.path()).unwrap();
    assert_eq!(
        content,
        "[\n  {\n    \"title\": \"Example\",\n    \"url\": \"https://example.com\"\n  }\n]"
    );
}

#[test]
fn test_add_duplicate_url_is_rejected() {
    let (_dir, mut mgr) = setup();
    mgr.add("One", "https://example.com").unwrap();
    assert_eq!(
        mgr.add("Two", "https://example.com").unwrap(),
        AddOutcome::AlreadyExists
    );
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.list()[0].title, "One");
}

#[test]
fn test_url_match_is_exact() {
    let (_dir, mut mgr) = setup();
    mgr.add("Lower", "https://example.com").unwrap();
    assert!(!mgr.contains("https://EXAMPLE.com"));
    assert!(!mgr.contains("http://example.com"));
    assert_eq!(mgr.add("Plain", "http://example.com").unwrap(), AddOutcome::Added);
}

#[test]
fn test_reopen_sees_saved_bookmarks() {
    let (dir, mut mgr) = setup();
    mgr.add("A", "https://a.test").unwrap();
    mgr.add("B", "https://b.test").unwrap();

    let reopened = BookmarkManager::open(dir.path().join("bookmarks.json"));
    assert_eq!(reopened.list(), mgr.list());
}

#[test]
fn test_remove_by_url_removes_every_copy() {
    let (dir, _) = setup();
    let path = dir.path().join("bookmarks.json");
    let hand_edited = vec![
        Bookmark::new("A", "https://a.test"),
        Bookmark::new("B", "https://b.test"),
        Bookmark::new("A again", "https://a.test"),
    ];
    bookmark_manager::save(&path, &hand_edited).unwrap();

    let mut mgr = BookmarkManager::open(&path);
    assert_eq!(mgr.remove_by_url("https://a.test").unwrap(), 2);
    assert_eq!(mgr.list(), &[Bookmark::new("B", "https://b.test")]);
    assert_eq!(bookmark_manager::load(&path), mgr.list());
}

#[test]
fn test_remove_by_url_without_match_does_not_write() {
    let (_dir, mut mgr) = setup();
    assert_eq!(mgr.remove_by_url("https://nowhere.test").unwrap(), 0);
    assert!(!mgr.path().exists());
}

#[test]
fn test_remove_by_index() {
    let (_dir, mut mgr) = setup();
    mgr.add("A", "https://a.test").unwrap();
    mgr.add("B", "https://b.test").unwrap();

    assert!(mgr.remove_by_index(0).unwrap());
    assert_eq!(mgr.list(), &[Bookmark::new("B", "https://b.test")]);
    assert!(!mgr.remove_by_index(5).unwrap());
    assert_eq!(mgr.len(), 1);
}

#[test]
fn test_update_trims_and_persists() {
    let (_dir, mut mgr) = setup();
    mgr.add("A", "https://a.test").unwrap();

    assert!(mgr.update(0, "  New title ", " https://new.test ").unwrap());
    assert_eq!(mgr.get(0), Some(&Bookmark::new("New title", "https://new.test")));
    assert_eq!(bookmark_manager::load(mgr.path()), mgr.list());
}

#[test]
fn test_update_rejects_blank_fields() {
    let (_dir, mut mgr) = setup();
    mgr.add("A", "https://a.test").unwrap();

    assert!(!mgr.update(0, "   ", "https://new.test").unwrap());
    assert!(!mgr.update(0, "New", "").unwrap());
    assert_eq!(mgr.get(0), Some(&Bookmark::new("A", "https://a.test")));
}

#[test]
fn test_update_out_of_range_is_noop() {
    let (_dir, mut mgr) = setup();
    assert!(!mgr.update(3, "T", "https://t.test").unwrap());
    assert!(mgr.is_empty());
}

#[test]
fn test_malformed_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.json");
    fs::write(&path, "{ \"title\": \"not a list\" }").unwrap();
    assert!(BookmarkManager::open(&path).is_empty());

    fs::write(&path, "garbage").unwrap();
    assert!(BookmarkManager::open(&path).is_empty());
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("bookmarks.json");
    bookmark_manager::save(&path, &[Bookmark::new("A", "https://a.test")]).unwrap();
    assert_eq!(bookmark_manager::load(&path).len(), 1);
}

#[test]
fn test_failed_write_leaves_list_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.json");
    let mut mgr = BookmarkManager::open(&path);
    mgr.add("A", "https://a.test").unwrap();

    // A directory where the file should be makes every write fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = mgr.add("B", "https://b.test").unwrap_err();
    assert!(matches!(err, BookmarkError::Io(_)));
    assert_eq!(mgr.list(), &[Bookmark::new("A", "https://a.test")]);

    assert!(mgr.remove_by_url("https://a.test").is_err());
    assert!(mgr.contains("https://a.test"));
}

#[test]
fn test_bad_record_does_not_hide_its_neighbours() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.json");
    fs::write(
        &path,
        r#"[
  { "title": "A", "url": "https://a.test" },
  { "title": "B", "url": "https://b.test" },
  { "url": "https://c.test" },
  { "title": "no url" },
  42
]"#,
    )
    .unwrap();

    let mut mgr = BookmarkManager::open(&path);
    assert_eq!(
        mgr.list(),
        &[
            Bookmark::new("A", "https://a.test"),
            Bookmark::new("B", "https://b.test"),
            Bookmark::new("", "https://c.test"),
        ]
    );

    // The next write keeps every readable record.
    mgr.add("D", "https://d.test").unwrap();
    let urls: Vec<String> = bookmark_manager::load(&path).into_iter().map(|b| b.url).collect();
    assert_eq!(urls, ["https://a.test", "https://b.test", "https://c.test", "https://d.test"]);
}
