use serde::{Deserialize, Serialize};

/// Status of a file download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum DownloadStatus {
    InProgress,
    Completed,
    Failed(String),
    Cancelled,
}

impl DownloadStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, DownloadStatus::InProgress)
    }
}

/// A download as listed in the download manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub filepath: Option<String>,
    pub status: DownloadStatus,
    pub started_at: i64,
    pub finished_at: Option<i64>,
}
