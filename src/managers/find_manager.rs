//! Find-in-page session.
//!
//! Holds the find bar's transient state and forwards searches to the active
//! page view. Toggling the match options never searches by itself.

use tracing::debug;

use crate::types::errors::ViewError;
use crate::types::find::{FindDirection, FindKeyAction, FindQuery, FindState};
use crate::view::PageView;

#[derive(Debug, Default)]
pub struct FindManager {
    state: FindState,
}

impl FindManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FindState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Shows the find bar. Returns whether it was hidden before.
    pub fn open(&mut self) -> bool {
        let was_hidden = !self.state.visible;
        self.state.visible = true;
        was_hidden
    }

    pub fn set_case_sensitive(&mut self, on: bool) {
        self.state.case_sensitive = on;
    }

    pub fn set_whole_word(&mut self, on: bool) {
        self.state.whole_word = on;
    }

    /// Searches `view` for `text`. Empty text, or no view, does nothing and
    /// returns `Ok(false)`.
    pub fn search<V: PageView>(
        &mut self,
        view: Option<&V>,
        text: &str,
        direction: FindDirection,
    ) -> Result<bool, ViewError> {
        if text.is_empty() {
            return Ok(false);
        }
        let Some(view) = view else {
            return Ok(false);
        };

        self.state.query = text.to_string();
        view.clear_find()?;
        view.find(&FindQuery {
            text: text.to_string(),
            case_sensitive: self.state.case_sensitive,
            whole_word: self.state.whole_word,
            direction,
        })?;
        debug!(query = text, ?direction, "find request sent");
        Ok(true)
    }

    /// Clears the highlight and query and hides the bar. Safe to repeat.
    pub fn close<V: PageView>(&mut self, view: Option<&V>) -> Result<(), ViewError> {
        self.state.query.clear();
        self.state.visible = false;
        match view {
            Some(view) => view.clear_find(),
            None => Ok(()),
        }
    }

    /// Maps a key pressed in the find input to an action.
    pub fn action_for_key(key: &str, shift: bool) -> Option<FindKeyAction> {
        match key {
            "Enter" if shift => Some(FindKeyAction::Search(FindDirection::Backward)),
            "Enter" => Some(FindKeyAction::Search(FindDirection::Forward)),
            "Escape" => Some(FindKeyAction::Close),
            _ => None,
        }
    }
}
