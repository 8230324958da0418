// KyoBrowser configuration
// Built once at startup and passed by reference to the shell and the GUI.
// Optional overrides live in `config.json` inside the platform config dir.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::platform;
use crate::types::errors::ConfigError;

pub const CONFIG_FILE: &str = "config.json";
pub const BOOKMARK_FILE: &str = "bookmarks.json";
const PROFILE_DIR: &str = "profile";

/// Default start page for new tabs and the home action.
pub const DEFAULT_HOME_URL: &str = "https://www.google.com";
/// Search engine URL; `{}` is replaced by the encoded query.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q={}";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Initial window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Application configuration.
///
/// `data_dir` is never read from the file; it comes from the platform layer
/// (or a test override) so the bookmark file and browsing profile always sit
/// next to each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub home_url: String,
    pub search_url: String,
    pub accept_language: String,
    pub user_agent: String,
    pub download_dir: Option<PathBuf>,
    pub window: WindowConfig,
    /// Shortcut overrides, action name to key combination.
    pub shortcuts: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::get_data_dir(),
            home_url: DEFAULT_HOME_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_dir: None,
            window: WindowConfig::default(),
            shortcuts: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Defaults rooted at `data_dir` instead of the platform data dir.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Reads `path`, falling back to defaults for any missing field.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path, data_dir: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::with_data_dir(data_dir));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let mut config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        config.data_dir = data_dir;
        Ok(config)
    }

    /// Loads the config from the platform config dir. Never fails: a broken
    /// file is logged and replaced by defaults.
    pub fn load_or_default() -> Self {
        let path = platform::get_config_dir().join(CONFIG_FILE);
        let data_dir = platform::get_data_dir();
        match Self::load(&path, data_dir.clone()) {
            Ok(config) => {
                debug!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unusable config file");
                Self::with_data_dir(data_dir)
            }
        }
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join(BOOKMARK_FILE)
    }

    /// Persistent engine profile (cookies, cache, local storage).
    pub fn profile_dir(&self) -> PathBuf {
        self.data_dir.join(PROFILE_DIR)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(platform::get_download_dir)
    }

    /// Language tags from `accept_language` in preference order, without
    /// quality weights. Engines that take a language list instead of a raw
    /// header are configured from this.
    pub fn preferred_languages(&self) -> Vec<String> {
        self.accept_language
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map(str::to_string)
            .collect()
    }
}
