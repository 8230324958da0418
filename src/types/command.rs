//! Messages flowing into and out of the shell.
//!
//! `ShellCommand` is what the chrome (toolbar, tab strip, find bar) and the
//! internal pages send over IPC, as JSON tagged by `cmd`. `PageEvent` is
//! what the engine reports about a tab. `ShellEffect` is what the shell asks
//! the GUI to do beyond re-rendering the chrome.

use serde::{Deserialize, Serialize};

use super::find::{FindDirection, FindState};
use super::tab::{TabId, TabSummary};

/// Pages served by the browser itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalPage {
    Bookmarks,
    Downloads,
    About,
    Shortcuts,
}

/// Custom protocol scheme serving internal pages.
pub const INTERNAL_SCHEME: &str = "kyo";

impl InternalPage {
    pub const ALL: [InternalPage; 4] = [
        InternalPage::Bookmarks,
        InternalPage::Downloads,
        InternalPage::About,
        InternalPage::Shortcuts,
    ];

    pub fn path(self) -> &'static str {
        match self {
            InternalPage::Bookmarks => "/bookmarks",
            InternalPage::Downloads => "/downloads",
            InternalPage::About => "/about",
            InternalPage::Shortcuts => "/shortcuts",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            InternalPage::Bookmarks => "Bookmarks",
            InternalPage::Downloads => "Downloads",
            InternalPage::About => "About KyoBrowser",
            InternalPage::Shortcuts => "Keyboard Shortcuts",
        }
    }

    /// URL the engine uses for this page. WebView2 maps custom schemes onto
    /// `http://<scheme>.<host>`.
    pub fn url(self) -> String {
        format!("{}{}", internal_origin(), self.path())
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    pub fn from_url(url: &str) -> Option<Self> {
        url.strip_prefix(&internal_origin())
            .and_then(|rest| rest.split(['?', '#']).next())
            .and_then(Self::from_path)
    }
}

pub fn internal_origin() -> String {
    if cfg!(target_os = "windows") {
        format!("http://{}.localhost", INTERNAL_SCHEME)
    } else {
        format!("{}://localhost", INTERNAL_SCHEME)
    }
}

pub fn is_internal_url(url: &str) -> bool {
    url.starts_with(&internal_origin())
}

/// A request from the chrome or from a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ShellCommand {
    /// The chrome finished loading and wants its first state.
    UiReady,
    NewTab,
    /// Closes `id`, or the active tab when absent.
    CloseTab {
        #[serde(default)]
        id: Option<TabId>,
    },
    Activate {
        id: TabId,
    },
    /// Raw address-bar text.
    Navigate {
        input: String,
    },
    Back,
    Forward,
    Reload,
    Home,
    /// Star button: remove the bookmark, or prompt for a title to add one.
    ToggleBookmark,
    /// Bookmark shortcut: prompt for a title unless already bookmarked.
    BookmarkPage,
    /// Confirmed add-bookmark prompt.
    AddBookmark {
        title: String,
        url: String,
    },
    OpenFind,
    CloseFind,
    Find {
        text: String,
        #[serde(default)]
        direction: FindDirection,
    },
    /// A key pressed inside the find input.
    FindKey {
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        text: String,
    },
    SetFindOptions {
        case_sensitive: bool,
        whole_word: bool,
    },
    /// The chrome opened or closed its auxiliary row (menu, prompt).
    SetPanel {
        open: bool,
    },
    OpenPage {
        page: InternalPage,
    },
    /// A key combination pressed anywhere.
    Shortcut {
        keys: String,
    },
    // Requests from internal pages.
    ListBookmarks,
    OpenBookmark {
        index: usize,
    },
    UpdateBookmark {
        index: usize,
        title: String,
        url: String,
    },
    DeleteBookmark {
        index: usize,
    },
    ListDownloads,
    ClearDownloads,
    ListShortcuts,
}

impl ShellCommand {
    /// Commands any web page may send. Everything else needs the chrome or
    /// an internal page.
    pub fn is_page_safe(&self) -> bool {
        matches!(self, ShellCommand::Shortcut { .. })
    }
}

/// Where a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Chrome,
    Page { tab: TabId, internal: bool },
}

impl Origin {
    pub fn is_trusted(self) -> bool {
        match self {
            Origin::Chrome => true,
            Origin::Page { internal, .. } => internal,
        }
    }
}

/// Something the engine reported about one tab.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    LoadStarted { url: String },
    LoadFinished { url: String },
    TitleChanged(String),
    IconChanged(Option<String>),
    UrlChanged(String),
    /// The page asked for a new top-level window.
    NewWindowRequested(String),
}

/// Follow-up work for the GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEffect {
    /// Short message for the user.
    Notify(String),
    /// Ask for a bookmark title, prefilled with `title`.
    PromptBookmarkTitle { title: String, url: String },
    FocusAddressBar,
    FocusFind,
    /// Data for an internal page shown in `tab`.
    Reply {
        tab: TabId,
        kind: &'static str,
        payload: serde_json::Value,
    },
}

/// Everything the chrome renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeState {
    pub tabs: Vec<TabSummary>,
    pub active_id: Option<TabId>,
    pub address: String,
    pub bookmarked: bool,
    pub find: FindState,
    pub panel_open: bool,
}
