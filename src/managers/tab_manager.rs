//! Tab Manager for KyoBrowser.
//!
//! Owns the ordered collection of page views, tracks which one is active,
//! and keeps the shared address display in step with it. The collection is
//! never allowed to shrink below one tab.

use tracing::{debug, info, warn};

use crate::types::errors::TabError;
use crate::types::tab::{TabId, TabSummary, LOADING_LABEL, NEW_TAB_LABEL};
use crate::view::{PageView, ViewFactory};

struct Tab<V> {
    id: TabId,
    view: V,
    title: String,
    label: String,
    icon: Option<String>,
    url: String,
    loading: bool,
}

impl<V> Tab<V> {
    fn new(id: TabId, view: V, url: &str) -> Self {
        Self {
            id,
            view,
            title: String::new(),
            label: NEW_TAB_LABEL.to_string(),
            icon: None,
            url: url.to_string(),
            loading: false,
        }
    }

    fn settled_label(&self) -> String {
        if self.title.is_empty() {
            NEW_TAB_LABEL.to_string()
        } else {
            self.title.clone()
        }
    }
}

/// Ordered tab collection with one active tab and a shared address display.
pub struct TabManager<V> {
    tabs: Vec<Tab<V>>,
    active: Option<TabId>,
    address: String,
}

impl<V: PageView> TabManager<V> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            address: String::new(),
        }
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab<V>> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    fn active_tab(&self) -> Option<&Tab<V>> {
        let id = self.active?;
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Opens a new tab at the end of the strip, activates it and starts
    /// loading `url`.
    pub fn open<F>(&mut self, url: &str, factory: &mut F) -> Result<TabId, TabError>
    where
        F: ViewFactory<View = V>,
    {
        let id = TabId::new();
        let view = factory.create_view(id)?;
        view.navigate(url)?;
        self.tabs.push(Tab::new(id, view, url));
        self.activate(id)?;
        info!(tab = %id, url, count = self.tabs.len(), "tab opened");
        Ok(id)
    }

    /// Closes a tab. Returns `Ok(false)` when it is the last one, which is
    /// kept open.
    pub fn close(&mut self, id: TabId) -> Result<bool, TabError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;

        if self.tabs.len() == 1 {
            debug!(tab = %id, "refusing to close the last tab");
            return Ok(false);
        }

        let was_active = self.active == Some(id);
        self.tabs.remove(index);

        if was_active {
            let next = self.tabs[index.min(self.tabs.len() - 1)].id;
            self.activate(next)?;
        }

        info!(tab = %id, count = self.tabs.len(), "tab closed");
        Ok(true)
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    /// Makes `id` the current tab, shows its view and hides the others.
    ///
    /// Only an unknown id is an error. The tab becomes current even if the
    /// engine fails to show or hide a view.
    pub fn activate(&mut self, id: TabId) -> Result<(), TabError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;

        self.active = Some(id);
        self.address = self.tabs[index].url.clone();

        for tab in self.tabs.iter().filter(|t| t.id != id) {
            if let Err(e) = tab.view.set_visible(false) {
                warn!(tab = %tab.id, error = %e, "failed to hide background tab");
            }
        }
        if let Err(e) = self.tabs[index].view.set_visible(true) {
            warn!(tab = %id, error = %e, "failed to show active tab");
        }
        Ok(())
    }

    /// Loads `url` in the active tab.
    pub fn navigate_active(&mut self, url: &str) -> Result<(), TabError> {
        let id = self.active.ok_or_else(|| TabError::NotFound("active".to_string()))?;
        self.navigate(id, url)
    }

    /// Loads `url` in a specific tab.
    pub fn navigate(&mut self, id: TabId, url: &str) -> Result<(), TabError> {
        let tab = self
            .tabs
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;
        tab.view.navigate(url)?;
        self.on_url_changed(id, url);
        Ok(())
    }

    pub fn back(&self) -> Result<(), TabError> {
        match self.active_view() {
            Some(view) => Ok(view.back()?),
            None => Ok(()),
        }
    }

    pub fn forward(&self) -> Result<(), TabError> {
        match self.active_view() {
            Some(view) => Ok(view.forward()?),
            None => Ok(()),
        }
    }

    pub fn reload(&self) -> Result<(), TabError> {
        match self.active_view() {
            Some(view) => Ok(view.reload()?),
            None => Ok(()),
        }
    }

    // ─── Engine events ───

    /// A navigation started in `id`.
    pub fn on_load_started(&mut self, id: TabId) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.loading = true;
                tab.label = LOADING_LABEL.to_string();
                true
            }
            None => false,
        }
    }

    /// A navigation finished in `id`.
    pub fn on_load_finished(&mut self, id: TabId) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.loading = false;
                tab.label = tab.settled_label();
                true
            }
            None => false,
        }
    }

    pub fn on_title_changed(&mut self, id: TabId, title: &str) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.title = title.trim().to_string();
                tab.label = tab.settled_label();
                true
            }
            None => false,
        }
    }

    pub fn on_icon_changed(&mut self, id: TabId, icon: Option<String>) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.icon = icon;
                true
            }
            None => false,
        }
    }

    /// Records the tab's new URL. The shared address display only follows
    /// when `id` is the active tab; returns whether it did.
    pub fn on_url_changed(&mut self, id: TabId, url: &str) -> bool {
        let Some(tab) = self.tab_mut(id) else {
            return false;
        };
        tab.url = url.to_string();
        if self.active == Some(id) {
            self.address = url.to_string();
            true
        } else {
            false
        }
    }

    // ─── Queries ───

    /// Text shown in the address bar.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn active_view(&self) -> Option<&V> {
        self.active_tab().map(|t| &t.view)
    }

    pub fn view_of(&self, id: TabId) -> Option<&V> {
        self.tabs.iter().find(|t| t.id == id).map(|t| &t.view)
    }

    /// Every view, in strip order.
    pub fn views(&self) -> impl Iterator<Item = &V> {
        self.tabs.iter().map(|t| &t.view)
    }

    pub fn active_url(&self) -> Option<&str> {
        self.active_tab().map(|t| t.url.as_str())
    }

    /// The active page's own title, empty when it has none.
    pub fn active_title(&self) -> &str {
        self.active_tab().map(|t| t.title.as_str()).unwrap_or("")
    }

    pub fn url_of(&self, id: TabId) -> Option<&str> {
        self.tabs.iter().find(|t| t.id == id).map(|t| t.url.as_str())
    }

    pub fn label_of(&self, id: TabId) -> Option<&str> {
        self.tabs.iter().find(|t| t.id == id).map(|t| t.label.as_str())
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .map(|t| TabSummary {
                id: t.id,
                label: t.label.clone(),
                icon: t.icon.clone(),
                url: t.url.clone(),
                loading: t.loading,
                active: self.active == Some(t.id),
            })
            .collect()
    }
}

impl<V: PageView> Default for TabManager<V> {
    fn default() -> Self {
        Self::new()
    }
}
