//! App Core for KyoBrowser.
//!
//! `App` is the shell window minus the pixels: it owns the bookmark store,
//! tab session, find session, download ledger and shortcut table, turns
//! chrome and page commands into calls on them, and reports back what the
//! GUI should do next. The GUI re-renders the chrome from `chrome_state()`
//! after every dispatch.

use std::fmt::Display;
use std::path::Path;

use serde_json::json;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::managers::bookmark_manager::{resolve_title, BookmarkManager, BookmarkManagerTrait};
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::find_manager::FindManager;
use crate::managers::shortcut_manager::{ShortcutAction, ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_manager::TabManager;
use crate::services::address_resolver::resolve_input;
use crate::types::bookmark::AddOutcome;
use crate::types::command::{
    ChromeState, InternalPage, Origin, PageEvent, ShellCommand, ShellEffect,
};
use crate::types::errors::{BookmarkError, TabError};
use crate::types::find::{FindDirection, FindKeyAction};
use crate::types::tab::TabId;
use crate::view::{PageView, ViewFactory};

pub const MSG_ALREADY_BOOKMARKED: &str = "This page is already bookmarked.";
pub const MSG_BOOKMARK_REMOVED: &str = "This page was removed from bookmarks.";
pub const MSG_BOOKMARK_SAVE_FAILED: &str = "Bookmarks could not be saved.";
pub const MSG_DOWNLOAD_CANCELLED: &str = "Download cancelled.";

/// Logs a failed operation and swallows it.
fn report<T, E: Display>(result: Result<T, E>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "{} failed", what);
            None
        }
    }
}

/// Central application struct holding all managers.
pub struct App<V> {
    pub config: AppConfig,
    pub bookmarks: BookmarkManager,
    pub tabs: TabManager<V>,
    pub find: FindManager,
    pub downloads: DownloadManager,
    pub shortcuts: ShortcutManager,
    panel_open: bool,
    /// URL of the add-bookmark prompt currently shown, if any.
    pending_bookmark: Option<String>,
}

impl<V: PageView> App<V> {
    /// Creates the app from an already-loaded configuration. Reads the
    /// bookmark file and applies shortcut overrides.
    pub fn new(config: AppConfig) -> Self {
        let bookmarks = BookmarkManager::open(config.bookmarks_path());

        let mut shortcuts = ShortcutManager::new();
        for (name, keys) in &config.shortcuts {
            match ShortcutAction::from_name(name) {
                Some(action) => {
                    report(shortcuts.register_shortcut(action, keys), "shortcut override");
                }
                None => warn!(action = %name, "unknown shortcut action in config"),
            }
        }

        Self {
            config,
            bookmarks,
            tabs: TabManager::new(),
            find: FindManager::new(),
            downloads: DownloadManager::new(),
            shortcuts,
            panel_open: false,
            pending_bookmark: None,
        }
    }

    /// Opens the first tab at the start page.
    pub fn startup<F>(&mut self, factory: &mut F) -> Result<TabId, TabError>
    where
        F: ViewFactory<View = V>,
    {
        let home = self.config.home_url.clone();
        let id = self.tabs.open(&home, factory)?;
        info!(bookmarks = self.bookmarks.len(), "shell started");
        Ok(id)
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// Rows the chrome needs: tab strip and toolbar, plus the find bar and
    /// the auxiliary panel when shown.
    pub fn chrome_rows(&self) -> u32 {
        2 + u32::from(self.find.is_visible()) + u32::from(self.panel_open)
    }

    /// Whether the active tab's URL is bookmarked (the star state).
    pub fn is_current_bookmarked(&self) -> bool {
        self.tabs
            .active_url()
            .is_some_and(|url| !url.is_empty() && self.bookmarks.contains(url))
    }

    pub fn chrome_state(&self) -> ChromeState {
        ChromeState {
            tabs: self.tabs.summaries(),
            active_id: self.tabs.active(),
            address: self.tabs.address().to_string(),
            bookmarked: self.is_current_bookmarked(),
            find: self.find.state().clone(),
            panel_open: self.panel_open,
        }
    }

    // ─── Commands ───

    pub fn dispatch<F>(
        &mut self,
        origin: Origin,
        command: ShellCommand,
        factory: &mut F,
    ) -> Vec<ShellEffect>
    where
        F: ViewFactory<View = V>,
    {
        if !origin.is_trusted() && !command.is_page_safe() {
            warn!(?origin, ?command, "ignoring privileged command from a web page");
            return Vec::new();
        }

        let mut effects = Vec::new();
        match command {
            ShellCommand::UiReady => {}
            ShellCommand::NewTab => {
                let home = self.config.home_url.clone();
                if self.open_tab(&home, factory).is_some() {
                    effects.push(ShellEffect::FocusAddressBar);
                }
            }
            ShellCommand::CloseTab { id } => {
                if let Some(id) = id.or(self.tabs.active()) {
                    self.close_tab(id);
                }
            }
            ShellCommand::Activate { id } => self.activate(id),
            ShellCommand::Navigate { input } => {
                if let Some(url) = resolve_input(&input, &self.config.search_url) {
                    info!(url = %url, "navigating");
                    report(self.tabs.navigate_active(&url), "navigation");
                }
            }
            ShellCommand::Back => {
                report(self.tabs.back(), "back");
            }
            ShellCommand::Forward => {
                report(self.tabs.forward(), "forward");
            }
            ShellCommand::Reload => {
                report(self.tabs.reload(), "reload");
            }
            ShellCommand::Home => {
                let home = self.config.home_url.clone();
                report(self.tabs.navigate_active(&home), "home");
            }
            ShellCommand::ToggleBookmark => self.toggle_bookmark(&mut effects),
            ShellCommand::BookmarkPage => self.bookmark_page(&mut effects),
            ShellCommand::AddBookmark { title, url } => {
                self.add_bookmark(&title, &url, &mut effects)
            }
            ShellCommand::OpenFind => {
                self.find.open();
                effects.push(ShellEffect::FocusFind);
            }
            ShellCommand::CloseFind => self.close_find(),
            ShellCommand::Find { text, direction } => self.search(&text, direction),
            ShellCommand::FindKey { key, shift, text } => {
                match FindManager::action_for_key(&key, shift) {
                    Some(FindKeyAction::Search(direction)) => self.search(&text, direction),
                    Some(FindKeyAction::Close) => self.close_find(),
                    None => {}
                }
            }
            ShellCommand::SetFindOptions {
                case_sensitive,
                whole_word,
            } => {
                self.find.set_case_sensitive(case_sensitive);
                self.find.set_whole_word(whole_word);
            }
            ShellCommand::SetPanel { open } => {
                self.panel_open = open;
                if !open {
                    self.pending_bookmark = None;
                }
            }
            ShellCommand::OpenPage { page } => self.open_page(page, factory),
            ShellCommand::Shortcut { keys } => {
                if let Some(action) = self.shortcuts.action_for(&keys) {
                    return self.run_shortcut(action, factory);
                }
            }
            ShellCommand::ListBookmarks => {
                effects.extend(self.reply(origin, "bookmarks", json!(self.bookmarks.list())))
            }
            ShellCommand::OpenBookmark { index } => {
                if let Some(url) = self.bookmarks.get(index).map(|b| b.url.clone()) {
                    self.open_tab(&url, factory);
                }
            }
            ShellCommand::UpdateBookmark { index, title, url } => {
                let result = self.bookmarks.update(index, &title, &url);
                self.after_bookmark_change(result.map(|changed| changed as usize), &mut effects);
            }
            ShellCommand::DeleteBookmark { index } => {
                let result = self.bookmarks.remove_by_index(index);
                self.after_bookmark_change(result.map(|removed| removed as usize), &mut effects);
            }
            ShellCommand::ListDownloads => {
                effects.extend(self.reply(origin, "downloads", self.downloads_payload()))
            }
            ShellCommand::ClearDownloads => {
                self.downloads.clear_finished();
                effects.extend(self.download_replies());
            }
            ShellCommand::ListShortcuts => {
                let payload = json!(self.shortcuts.list_shortcuts());
                effects.extend(self.reply(origin, "shortcuts", payload))
            }
        }
        effects
    }

    fn run_shortcut<F>(&mut self, action: ShortcutAction, factory: &mut F) -> Vec<ShellEffect>
    where
        F: ViewFactory<View = V>,
    {
        let command = match action {
            ShortcutAction::FocusAddressBar => return vec![ShellEffect::FocusAddressBar],
            ShortcutAction::NewTab => ShellCommand::NewTab,
            ShortcutAction::CloseTab => ShellCommand::CloseTab { id: None },
            ShortcutAction::BookmarkPage => ShellCommand::BookmarkPage,
            ShortcutAction::Find => ShellCommand::OpenFind,
            ShortcutAction::Reload => ShellCommand::Reload,
            ShortcutAction::Back => ShellCommand::Back,
            ShortcutAction::Forward => ShellCommand::Forward,
            ShortcutAction::Home => ShellCommand::Home,
            ShortcutAction::BookmarkManager => ShellCommand::OpenPage {
                page: InternalPage::Bookmarks,
            },
            ShortcutAction::Downloads => ShellCommand::OpenPage {
                page: InternalPage::Downloads,
            },
            ShortcutAction::ShortcutHelp => ShellCommand::OpenPage {
                page: InternalPage::Shortcuts,
            },
        };
        self.dispatch(Origin::Chrome, command, factory)
    }

    // ─── Engine events ───

    pub fn handle_page_event<F>(
        &mut self,
        tab: TabId,
        event: PageEvent,
        factory: &mut F,
    ) -> Vec<ShellEffect>
    where
        F: ViewFactory<View = V>,
    {
        match event {
            PageEvent::LoadStarted { url } => {
                self.tabs.on_load_started(tab);
                self.tabs.on_url_changed(tab, &url);
            }
            PageEvent::LoadFinished { url } => {
                self.tabs.on_url_changed(tab, &url);
                self.tabs.on_load_finished(tab);
            }
            PageEvent::TitleChanged(title) => {
                self.tabs.on_title_changed(tab, &title);
            }
            PageEvent::IconChanged(icon) => {
                self.tabs.on_icon_changed(tab, icon);
            }
            PageEvent::UrlChanged(url) => {
                self.tabs.on_url_changed(tab, &url);
            }
            PageEvent::NewWindowRequested(url) => {
                let home = self.config.home_url.clone();
                if let Some(id) = self.open_tab(&home, factory) {
                    if url != home {
                        report(self.tabs.navigate(id, &url), "new window redirect");
                    }
                }
            }
        }
        Vec::new()
    }

    /// Records a download the engine is about to start. `target` is `None`
    /// when the user cancelled the save dialog.
    pub fn download_started<F>(
        &mut self,
        url: &str,
        target: Option<&Path>,
        factory: &mut F,
    ) -> Vec<ShellEffect>
    where
        F: ViewFactory<View = V>,
    {
        self.downloads.start_download(url, target);
        if target.is_none() {
            return vec![ShellEffect::Notify(MSG_DOWNLOAD_CANCELLED.to_string())];
        }
        self.open_page(InternalPage::Downloads, factory);
        self.download_replies()
    }

    pub fn download_finished(
        &mut self,
        url: &str,
        path: Option<&Path>,
        success: bool,
    ) -> Vec<ShellEffect> {
        report(self.downloads.finish_download(url, path, success), "download bookkeeping");
        self.download_replies()
    }

    // ─── Tabs ───

    fn open_tab<F>(&mut self, url: &str, factory: &mut F) -> Option<TabId>
    where
        F: ViewFactory<View = V>,
    {
        self.leave_active_tab();
        match self.tabs.open(url, factory) {
            Ok(id) => Some(id),
            Err(e) => {
                error!(url, error = %e, "failed to open tab");
                None
            }
        }
    }

    fn close_tab(&mut self, id: TabId) {
        if self.tabs.active() == Some(id) && self.tabs.len() > 1 {
            self.leave_active_tab();
        }
        report(self.tabs.close(id), "close tab");
    }

    fn activate(&mut self, id: TabId) {
        if self.tabs.active() != Some(id) {
            self.leave_active_tab();
        }
        report(self.tabs.activate(id), "activate tab");
    }

    /// The find session belongs to the active tab; it ends when that tab
    /// stops being active.
    fn leave_active_tab(&mut self) {
        if self.find.is_visible() {
            self.close_find();
        }
    }

    fn open_page<F>(&mut self, page: InternalPage, factory: &mut F)
    where
        F: ViewFactory<View = V>,
    {
        match self.tabs_showing(page).first() {
            Some(&id) => self.activate(id),
            None => {
                self.open_tab(&page.url(), factory);
            }
        }
    }

    fn tabs_showing(&self, page: InternalPage) -> Vec<TabId> {
        self.tabs
            .summaries()
            .into_iter()
            .filter(|t| InternalPage::from_url(&t.url) == Some(page))
            .map(|t| t.id)
            .collect()
    }

    // ─── Find ───

    fn search(&mut self, text: &str, direction: FindDirection) {
        report(self.find.search(self.tabs.active_view(), text, direction), "find");
    }

    fn close_find(&mut self) {
        report(self.find.close(self.tabs.active_view()), "clear find highlight");
    }

    // ─── Bookmarks ───

    fn current_url(&self) -> Option<String> {
        self.tabs
            .active_url()
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    fn prompt_bookmark(&mut self, url: String, effects: &mut Vec<ShellEffect>) {
        if self.pending_bookmark.is_some() {
            return;
        }
        self.pending_bookmark = Some(url.clone());
        self.panel_open = true;
        effects.push(ShellEffect::PromptBookmarkTitle {
            title: resolve_title(None, self.tabs.active_title()),
            url,
        });
    }

    fn toggle_bookmark(&mut self, effects: &mut Vec<ShellEffect>) {
        let Some(url) = self.current_url() else {
            return;
        };
        if self.bookmarks.contains(&url) {
            let result = self.bookmarks.remove_by_url(&url);
            if self.after_bookmark_change(result, effects) {
                effects.push(ShellEffect::Notify(MSG_BOOKMARK_REMOVED.to_string()));
            }
        } else {
            self.prompt_bookmark(url, effects);
        }
    }

    fn bookmark_page(&mut self, effects: &mut Vec<ShellEffect>) {
        let Some(url) = self.current_url() else {
            return;
        };
        if self.bookmarks.contains(&url) {
            effects.push(ShellEffect::Notify(MSG_ALREADY_BOOKMARKED.to_string()));
        } else {
            self.prompt_bookmark(url, effects);
        }
    }

    fn add_bookmark(&mut self, title: &str, url: &str, effects: &mut Vec<ShellEffect>) {
        self.pending_bookmark = None;
        self.panel_open = false;
        if url.trim().is_empty() {
            return;
        }
        let page_title = if self.tabs.active_url() == Some(url) {
            self.tabs.active_title()
        } else {
            ""
        };
        let title = resolve_title(Some(title), page_title);

        match self.bookmarks.add(&title, url) {
            Ok(AddOutcome::Added) => {
                info!(url, "bookmark added");
                effects.push(ShellEffect::Notify(format!("'{}' was added to bookmarks.", title)));
                effects.extend(self.bookmark_replies());
            }
            Ok(AddOutcome::AlreadyExists) => {
                effects.push(ShellEffect::Notify(MSG_ALREADY_BOOKMARKED.to_string()));
            }
            Err(e) => self.bookmark_save_failed(e, effects),
        }
    }

    /// Refreshes open bookmark pages after a mutation. Returns whether
    /// anything changed.
    fn after_bookmark_change(
        &self,
        result: Result<usize, BookmarkError>,
        effects: &mut Vec<ShellEffect>,
    ) -> bool {
        match result {
            Ok(0) => false,
            Ok(_) => {
                effects.extend(self.bookmark_replies());
                true
            }
            Err(e) => {
                self.bookmark_save_failed(e, effects);
                false
            }
        }
    }

    fn bookmark_save_failed(&self, e: BookmarkError, effects: &mut Vec<ShellEffect>) {
        error!(path = %self.bookmarks.path().display(), error = %e, "bookmark write failed");
        effects.push(ShellEffect::Notify(MSG_BOOKMARK_SAVE_FAILED.to_string()));
    }

    // ─── Internal page replies ───

    fn reply(
        &self,
        origin: Origin,
        kind: &'static str,
        payload: serde_json::Value,
    ) -> Option<ShellEffect> {
        match origin {
            Origin::Page { tab, .. } => Some(ShellEffect::Reply { tab, kind, payload }),
            Origin::Chrome => None,
        }
    }

    fn broadcast(
        &self,
        page: InternalPage,
        kind: &'static str,
        payload: serde_json::Value,
    ) -> Vec<ShellEffect> {
        self.tabs_showing(page)
            .into_iter()
            .map(|tab| ShellEffect::Reply {
                tab,
                kind,
                payload: payload.clone(),
            })
            .collect()
    }

    fn bookmark_replies(&self) -> Vec<ShellEffect> {
        self.broadcast(InternalPage::Bookmarks, "bookmarks", json!(self.bookmarks.list()))
    }

    fn downloads_payload(&self) -> serde_json::Value {
        json!(self.downloads.list_downloads())
    }

    fn download_replies(&self) -> Vec<ShellEffect> {
        self.broadcast(InternalPage::Downloads, "downloads", self.downloads_payload())
    }
}
