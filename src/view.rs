//! Seam between the shell and the embedded web engine.
//!
//! Everything the shell asks of a page view goes through `PageView`, and new
//! views are built through `ViewFactory`. The GUI layer implements both with
//! `wry` webviews; tests implement them with recording fakes.

use crate::types::errors::ViewError;
use crate::types::find::FindQuery;
use crate::types::tab::TabId;

/// One embedded page view.
pub trait PageView {
    fn navigate(&self, url: &str) -> Result<(), ViewError>;
    fn back(&self) -> Result<(), ViewError>;
    fn forward(&self) -> Result<(), ViewError>;
    fn reload(&self) -> Result<(), ViewError>;
    /// Highlights the next match of `query`.
    fn find(&self, query: &FindQuery) -> Result<(), ViewError>;
    /// Removes any find highlight.
    fn clear_find(&self) -> Result<(), ViewError>;
    fn set_visible(&self, visible: bool) -> Result<(), ViewError>;
}

/// Builds page views for new tabs. The view must report its events tagged
/// with `id`.
pub trait ViewFactory {
    type View: PageView;

    fn create_view(&mut self, id: TabId) -> Result<Self::View, ViewError>;
}
