// KyoBrowser platform paths for Linux
// Config:    ~/.config/kyobrowser
// Data:      ~/.local/share/kyobrowser
// Downloads: XDG_DOWNLOAD_DIR (environment, then user-dirs.dirs) or ~/Downloads

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const USER_DIRS_FILE: &str = "user-dirs.dirs";
const DOWNLOAD_KEY: &str = "XDG_DOWNLOAD_DIR";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn xdg_config_home() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join(".config"),
    }
}

/// Uses `$XDG_CONFIG_HOME/kyobrowser` if set, otherwise `~/.config/kyobrowser`.
pub fn get_config_dir() -> PathBuf {
    xdg_config_home().join("kyobrowser")
}

/// Uses `$XDG_DATA_HOME/kyobrowser` if set, otherwise `~/.local/share/kyobrowser`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("kyobrowser"),
        _ => home_dir().join(".local").join("share").join("kyobrowser"),
    }
}

/// An exported `XDG_DOWNLOAD_DIR` wins; otherwise the entry written by
/// xdg-user-dirs in `$XDG_CONFIG_HOME/user-dirs.dirs`; otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    if let Ok(dir) = env::var(DOWNLOAD_KEY) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    let home = home_dir();
    fs::read_to_string(xdg_config_home().join(USER_DIRS_FILE))
        .ok()
        .and_then(|content| parse_user_dir(&content, DOWNLOAD_KEY, &home))
        .unwrap_or_else(|| home.join("Downloads"))
}

/// Reads `key` from a user-dirs.dirs file. Values are `"$HOME/..."` or
/// absolute paths; a bare `"$HOME/"` means the directory is disabled.
fn parse_user_dir(content: &str, key: &str, home: &Path) -> Option<PathBuf> {
    let value = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(name, _)| name.trim() == key)
        .map(|(_, value)| value.trim().trim_matches('"'))?;

    if let Some(rest) = value.strip_prefix("$HOME") {
        let rest = rest.trim_start_matches('/');
        return (!rest.is_empty()).then(|| home.join(rest));
    }
    value.starts_with('/').then(|| PathBuf::from(value))
}
