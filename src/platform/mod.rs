// KyoBrowser platform abstraction
// Per-user directories for configuration, browsing data and downloads.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for KyoBrowser.
///
/// - **Linux**: `~/.config/kyobrowser` (or `$XDG_CONFIG_HOME/kyobrowser`)
/// - **macOS**: `~/Library/Application Support/KyoBrowser`
/// - **Windows**: `%APPDATA%/KyoBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory holding the browsing profile and bookmarks.
///
/// - **Linux**: `~/.local/share/kyobrowser` (or `$XDG_DATA_HOME/kyobrowser`)
/// - **macOS**: `~/Library/Application Support/KyoBrowser`
/// - **Windows**: `%LOCALAPPDATA%/KyoBrowser`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Returns the user's download directory, the default save location.
pub fn get_download_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_download_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_download_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_download_dir()
    }
}
