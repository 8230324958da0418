use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label shown while a tab is loading.
pub const LOADING_LABEL: &str = "Loading…";
/// Label shown when a page has no title.
pub const NEW_TAB_LABEL: &str = "New Tab";

/// Opaque handle identifying one open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the tab strip needs to render one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub id: TabId,
    pub label: String,
    pub icon: Option<String>,
    pub url: String,
    pub loading: bool,
    pub active: bool,
}
