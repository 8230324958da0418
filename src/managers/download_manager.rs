//! Download Manager for KyoBrowser.
//!
//! The engine moves the bytes; this ledger only records what was started,
//! where it is going and how it ended, for the download manager page.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};
use uuid::Uuid;

use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;

/// File name used when neither the engine nor the URL suggests one.
pub const FALLBACK_FILENAME: &str = "download";

/// Trait defining download management operations.
pub trait DownloadManagerTrait {
    /// Records a download. A `None` target means the user declined to pick
    /// one and the download is recorded as cancelled.
    fn start_download(&mut self, url: &str, target: Option<&Path>) -> String;
    /// Marks the newest in-progress download of `url` as finished.
    fn finish_download(
        &mut self,
        url: &str,
        path: Option<&Path>,
        success: bool,
    ) -> Result<String, DownloadError>;
    /// Downloads, newest first.
    fn list_downloads(&self) -> Vec<&DownloadItem>;
    fn get_download(&self, id: &str) -> Option<&DownloadItem>;
    /// Drops every finished entry. Returns how many were removed.
    fn clear_finished(&mut self) -> usize;
}

#[derive(Debug, Default)]
pub struct DownloadManager {
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ts() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn start_download(&mut self, url: &str, target: Option<&Path>) -> String {
        let id = Uuid::new_v4().to_string();
        let (filename, filepath, status, finished_at) = match target {
            Some(path) => (
                file_name_of(path).unwrap_or_else(|| filename_from_url(url)),
                Some(path.to_string_lossy().to_string()),
                DownloadStatus::InProgress,
                None,
            ),
            None => (
                filename_from_url(url),
                None,
                DownloadStatus::Cancelled,
                Some(Self::now_ts()),
            ),
        };

        info!(id = %id, url, ?status, "download recorded");
        self.downloads.push(DownloadItem {
            id: id.clone(),
            url: url.to_string(),
            filename,
            filepath,
            status,
            started_at: Self::now_ts(),
            finished_at,
        });
        id
    }

    fn finish_download(
        &mut self,
        url: &str,
        path: Option<&Path>,
        success: bool,
    ) -> Result<String, DownloadError> {
        let item = self
            .downloads
            .iter_mut()
            .rev()
            .find(|d| d.url == url && d.status == DownloadStatus::InProgress)
            .ok_or_else(|| DownloadError::NotFound(url.to_string()))?;

        if let Some(path) = path {
            item.filepath = Some(path.to_string_lossy().to_string());
            if let Some(name) = file_name_of(path) {
                item.filename = name;
            }
        }
        item.status = if success {
            DownloadStatus::Completed
        } else {
            DownloadStatus::Failed("interrupted".to_string())
        };
        item.finished_at = Some(Self::now_ts());

        if success {
            info!(id = %item.id, url, "download completed");
        } else {
            warn!(id = %item.id, url, "download failed");
        }
        Ok(item.id.clone())
    }

    fn list_downloads(&self) -> Vec<&DownloadItem> {
        self.downloads.iter().rev().collect()
    }

    fn get_download(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }

    fn clear_finished(&mut self) -> usize {
        let before = self.downloads.len();
        self.downloads.retain(|d| !d.status.is_finished());
        before - self.downloads.len()
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
}

/// Last non-empty path segment of `url`, percent-decoded, or the fallback
/// name.
pub fn filename_from_url(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(decode_segment))
        })
        .filter(|name| !matches!(name.as_str(), "" | "." | ".."))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Decodes `%XX` escapes. Separators that decode out of the segment are
/// replaced so the name stays a single path component.
fn decode_segment(segment: &str) -> String {
    let decoded = match urlencoding::decode(segment) {
        Ok(name) => name.into_owned(),
        Err(_) => segment.to_string(),
    };
    decoded.replace(['/', '\\'], "_")
}

/// Where a download goes unless the user picks otherwise: `dir` joined with
/// the engine's suggested name, or a name taken from the URL.
pub fn default_target(dir: &Path, url: &str, suggested: &Path) -> PathBuf {
    let name = file_name_of(suggested).unwrap_or_else(|| filename_from_url(url));
    dir.join(name)
}

/// Makes sure the parent directory of `target` exists.
pub fn prepare_target(target: &Path) -> Result<(), DownloadError> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| DownloadError::FileSystemError(format!("{}: {}", parent.display(), e))),
        _ => Ok(()),
    }
}
