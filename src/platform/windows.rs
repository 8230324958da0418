// KyoBrowser platform paths for Windows
// Config:    %APPDATA%/KyoBrowser
// Data:      %LOCALAPPDATA%/KyoBrowser
// Downloads: %USERPROFILE%/Downloads

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/KyoBrowser`
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("KyoBrowser")
}

/// `%LOCALAPPDATA%/KyoBrowser`. The WebView2 profile is large, so it stays
/// out of the roaming profile.
pub fn get_data_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("KyoBrowser")
}

pub fn get_download_dir() -> PathBuf {
    let profile =
        env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\Users\\Default"));
    PathBuf::from(profile).join("Downloads")
}
