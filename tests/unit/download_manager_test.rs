//! Unit tests for the session download ledger.

use std::path::{Path, PathBuf};

use kyobrowser::managers::download_manager::{
    default_target, filename_from_url, prepare_target, DownloadManager, DownloadManagerTrait,
};
use kyobrowser::types::download::DownloadStatus;
use kyobrowser::types::errors::DownloadError;
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn test_accepted_download_is_in_progress() {
    let mut mgr = DownloadManager::new();
    let id = mgr.start_download("https://a.test/file.zip", Some(Path::new("/tmp/saved.zip")));

    let item = mgr.get_download(&id).unwrap();
    assert_eq!(item.status, DownloadStatus::InProgress);
    assert_eq!(item.filename, "saved.zip");
    assert_eq!(item.filepath.as_deref(), Some("/tmp/saved.zip"));
    assert!(item.finished_at.is_none());
}

#[test]
fn test_cancelled_dialog_records_cancelled() {
    let mut mgr = DownloadManager::new();
    let id = mgr.start_download("https://a.test/file.zip", None);

    let item = mgr.get_download(&id).unwrap();
    assert_eq!(item.status, DownloadStatus::Cancelled);
    assert_eq!(item.filename, "file.zip");
    assert!(item.filepath.is_none());
    assert!(item.finished_at.is_some());
}

#[test]
fn test_finish_marks_newest_in_progress_entry() {
    let mut mgr = DownloadManager::new();
    let url = "https://a.test/file.zip";
    let first = mgr.start_download(url, Some(Path::new("/tmp/one.zip")));
    let second = mgr.start_download(url, Some(Path::new("/tmp/two.zip")));

    let finished = mgr.finish_download(url, None, true).unwrap();
    assert_eq!(finished, second);
    assert_eq!(mgr.get_download(&second).unwrap().status, DownloadStatus::Completed);
    assert_eq!(mgr.get_download(&first).unwrap().status, DownloadStatus::InProgress);
}

#[test]
fn test_failed_download_keeps_reason() {
    let mut mgr = DownloadManager::new();
    let url = "https://a.test/file.zip";
    let id = mgr.start_download(url, Some(Path::new("/tmp/file.zip")));
    mgr.finish_download(url, Some(Path::new("/tmp/renamed.zip")), false).unwrap();

    let item = mgr.get_download(&id).unwrap();
    assert!(matches!(item.status, DownloadStatus::Failed(_)));
    assert_eq!(item.filename, "renamed.zip");
}

#[test]
fn test_finish_unknown_url_is_not_found() {
    let mut mgr = DownloadManager::new();
    mgr.start_download("https://a.test/cancelled.zip", None);
    let err = mgr.finish_download("https://a.test/cancelled.zip", None, true).unwrap_err();
    assert!(matches!(err, DownloadError::NotFound(_)));
}

#[test]
fn test_list_is_newest_first_and_clear_keeps_running() {
    let mut mgr = DownloadManager::new();
    let done = mgr.start_download("https://a.test/a.zip", Some(Path::new("/tmp/a.zip")));
    let running = mgr.start_download("https://a.test/b.zip", Some(Path::new("/tmp/b.zip")));
    mgr.finish_download("https://a.test/a.zip", None, true).unwrap();

    let ids: Vec<&str> = mgr.list_downloads().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec![running.as_str(), done.as_str()]);

    assert_eq!(mgr.clear_finished(), 1);
    assert_eq!(mgr.list_downloads().len(), 1);
    assert!(mgr.get_download(&running).is_some());
}

#[test]
fn test_status_serializes_with_reason() {
    let json = serde_json::to_value(DownloadStatus::Failed("interrupted".to_string())).unwrap();
    assert_eq!(json, serde_json::json!({"state": "failed", "reason": "interrupted"}));
    let json = serde_json::to_value(DownloadStatus::InProgress).unwrap();
    assert_eq!(json, serde_json::json!({"state": "in_progress"}));
}

#[rstest]
#[case("https://a.test/files/report.pdf", "report.pdf")]
#[case("https://a.test/files/", "files")]
#[case("https://a.test/", "download")]
#[case("not a url", "download")]
#[case("https://a.test/docs/my%20file.pdf", "my file.pdf")]
#[case("https://a.test/%EB%B3%B4%EA%B3%A0%EC%84%9C.hwp", "보고서.hwp")]
#[case("https://a.test/a%2Fb.txt", "a_b.txt")]
#[case("https://a.test/%2E%2E", "download")]
fn test_filename_from_url(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(filename_from_url(url), expected);
}

#[test]
fn test_default_target_uses_download_dir() {
    let dir = Path::new("/home/u/Downloads");
    let target = default_target(dir, "https://a.test/x.bin", Path::new(""));
    assert_eq!(target, PathBuf::from("/home/u/Downloads/x.bin"));
}

#[test]
fn test_prepare_target_creates_parent() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("sub").join("file.bin");
    prepare_target(&target).unwrap();
    assert!(dir.path().join("sub").is_dir());
}
