//! Shortcut Manager for KyoBrowser.
//!
//! Maps key combinations such as `Ctrl+T` to shell actions, with conflict
//! detection and platform-specific modifier key adaptation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::errors::ShortcutError;

/// Actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    FocusAddressBar,
    NewTab,
    CloseTab,
    BookmarkPage,
    Find,
    Reload,
    Back,
    Forward,
    Home,
    BookmarkManager,
    Downloads,
    ShortcutHelp,
}

impl ShortcutAction {
    /// Every action, in cheat-sheet order.
    pub const ALL: [ShortcutAction; 12] = [
        ShortcutAction::FocusAddressBar,
        ShortcutAction::NewTab,
        ShortcutAction::CloseTab,
        ShortcutAction::BookmarkPage,
        ShortcutAction::Find,
        ShortcutAction::Reload,
        ShortcutAction::Back,
        ShortcutAction::Forward,
        ShortcutAction::Home,
        ShortcutAction::BookmarkManager,
        ShortcutAction::Downloads,
        ShortcutAction::ShortcutHelp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::FocusAddressBar => "focus_address_bar",
            ShortcutAction::NewTab => "new_tab",
            ShortcutAction::CloseTab => "close_tab",
            ShortcutAction::BookmarkPage => "bookmark_page",
            ShortcutAction::Find => "find",
            ShortcutAction::Reload => "reload",
            ShortcutAction::Back => "back",
            ShortcutAction::Forward => "forward",
            ShortcutAction::Home => "home",
            ShortcutAction::BookmarkManager => "bookmark_manager",
            ShortcutAction::Downloads => "downloads",
            ShortcutAction::ShortcutHelp => "shortcut_help",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Human-readable description for the shortcut sheet.
    pub fn description(self) -> &'static str {
        match self {
            ShortcutAction::FocusAddressBar => "Focus the address bar",
            ShortcutAction::NewTab => "Open a new tab",
            ShortcutAction::CloseTab => "Close the current tab",
            ShortcutAction::BookmarkPage => "Bookmark this page",
            ShortcutAction::Find => "Find in page",
            ShortcutAction::Reload => "Reload",
            ShortcutAction::Back => "Back",
            ShortcutAction::Forward => "Forward",
            ShortcutAction::Home => "Go to the start page",
            ShortcutAction::BookmarkManager => "Open the bookmark manager",
            ShortcutAction::Downloads => "Open the download manager",
            ShortcutAction::ShortcutHelp => "Show keyboard shortcuts",
        }
    }
}

/// One row of the shortcut sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutEntry {
    pub action: ShortcutAction,
    pub keys: String,
    pub description: &'static str,
}

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(
        &mut self,
        action: ShortcutAction,
        keys: &str,
    ) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: ShortcutAction) -> Option<&str>;
    fn action_for(&self, keys: &str) -> Option<ShortcutAction>;
    fn list_shortcuts(&self) -> Vec<ShortcutEntry>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(
        &self,
        keys: &str,
        exclude_action: Option<ShortcutAction>,
    ) -> Option<ShortcutAction>;
    fn get_default_shortcuts(&self) -> HashMap<ShortcutAction, String>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<ShortcutAction, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        let mut mgr = Self {
            shortcuts: HashMap::new(),
        };
        mgr.shortcuts = mgr.get_default_shortcuts();
        mgr
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(
        &mut self,
        action: ShortcutAction,
        keys: &str,
    ) -> Result<(), ShortcutError> {
        let keys = keys.trim();
        if keys.is_empty() || keys.ends_with('+') {
            return Err(ShortcutError::InvalidKeys(format!("'{}'", keys)));
        }

        if let Some(conflicting) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys,
                conflicting.name()
            )));
        }

        self.shortcuts.insert(action, Self::adapt_for_platform(keys));
        Ok(())
    }

    fn get_shortcut(&self, action: ShortcutAction) -> Option<&str> {
        self.shortcuts.get(&action).map(|s| s.as_str())
    }

    fn action_for(&self, keys: &str) -> Option<ShortcutAction> {
        self.has_conflict(keys, None)
    }

    fn list_shortcuts(&self) -> Vec<ShortcutEntry> {
        ShortcutAction::ALL
            .into_iter()
            .filter_map(|action| {
                self.shortcuts.get(&action).map(|keys| ShortcutEntry {
                    action,
                    keys: keys.clone(),
                    description: action.description(),
                })
            })
            .collect()
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = self.get_default_shortcuts();
    }

    fn has_conflict(
        &self,
        keys: &str,
        exclude_action: Option<ShortcutAction>,
    ) -> Option<ShortcutAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(action, bound)| **bound == adapted && Some(**action) != exclude_action)
            .map(|(action, _)| *action)
    }

    fn get_default_shortcuts(&self) -> HashMap<ShortcutAction, String> {
        let defaults = [
            (ShortcutAction::FocusAddressBar, "Ctrl+L"),
            (ShortcutAction::NewTab, "Ctrl+T"),
            (ShortcutAction::CloseTab, "Ctrl+W"),
            (ShortcutAction::BookmarkPage, "Ctrl+D"),
            (ShortcutAction::Find, "Ctrl+F"),
            (ShortcutAction::Reload, "Ctrl+R"),
            (ShortcutAction::Back, "Alt+Left"),
            (ShortcutAction::Forward, "Alt+Right"),
            (ShortcutAction::Home, "Alt+Home"),
            (ShortcutAction::BookmarkManager, "Ctrl+Shift+B"),
            (ShortcutAction::Downloads, "Ctrl+J"),
            (ShortcutAction::ShortcutHelp, "F1"),
        ];

        defaults
            .into_iter()
            .map(|(a, k)| (a, Self::adapt_for_platform(k)))
            .collect()
    }
}
