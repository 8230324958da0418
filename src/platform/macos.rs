// KyoBrowser platform paths for macOS
// Config:    ~/Library/Application Support/KyoBrowser
// Data:      ~/Library/Application Support/KyoBrowser
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/KyoBrowser`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("KyoBrowser")
}

/// Same as the config dir on macOS.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn get_download_dir() -> PathBuf {
    home_dir().join("Downloads")
}
