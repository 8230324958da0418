//! Recording fake page views shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kyobrowser::types::errors::ViewError;
use kyobrowser::types::find::FindQuery;
use kyobrowser::types::tab::TabId;
use kyobrowser::view::{PageView, ViewFactory};

/// One call made on a fake view.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(String),
    Back,
    Forward,
    Reload,
    Find(FindQuery),
    ClearFind,
    SetVisible(bool),
}

pub type CallLog = Rc<RefCell<Vec<(TabId, Call)>>>;

pub struct FakeView {
    id: TabId,
    log: CallLog,
    fail_navigation: bool,
    fail_show: bool,
}

impl FakeView {
    fn record(&self, call: Call) {
        self.log.borrow_mut().push((self.id, call));
    }
}

impl PageView for FakeView {
    fn navigate(&self, url: &str) -> Result<(), ViewError> {
        if self.fail_navigation {
            return Err(ViewError::Navigation(url.to_string()));
        }
        self.record(Call::Navigate(url.to_string()));
        Ok(())
    }

    fn back(&self) -> Result<(), ViewError> {
        self.record(Call::Back);
        Ok(())
    }

    fn forward(&self) -> Result<(), ViewError> {
        self.record(Call::Forward);
        Ok(())
    }

    fn reload(&self) -> Result<(), ViewError> {
        self.record(Call::Reload);
        Ok(())
    }

    fn find(&self, query: &FindQuery) -> Result<(), ViewError> {
        self.record(Call::Find(query.clone()));
        Ok(())
    }

    fn clear_find(&self) -> Result<(), ViewError> {
        self.record(Call::ClearFind);
        Ok(())
    }

    fn set_visible(&self, visible: bool) -> Result<(), ViewError> {
        self.record(Call::SetVisible(visible));
        if visible && self.fail_show {
            return Err(ViewError::Layout("fake view cannot be shown".to_string()));
        }
        Ok(())
    }
}

/// Hands out `FakeView`s that all write to one shared log.
#[derive(Default)]
pub struct FakeFactory {
    pub log: CallLog,
    pub fail_creation: bool,
    pub fail_navigation: bool,
    /// Views created while set refuse `set_visible(true)`.
    pub fail_show: bool,
    pub created: usize,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded for `id`, oldest first.
    pub fn calls_for(&self, id: TabId) -> Vec<Call> {
        self.log
            .borrow()
            .iter()
            .filter(|(tab, _)| *tab == id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn last_call_for(&self, id: TabId) -> Option<Call> {
        self.calls_for(id).pop()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl ViewFactory for FakeFactory {
    type View = FakeView;

    fn create_view(&mut self, id: TabId) -> Result<FakeView, ViewError> {
        if self.fail_creation {
            return Err(ViewError::Creation("fake engine unavailable".to_string()));
        }
        self.created += 1;
        Ok(FakeView {
            id,
            log: Rc::clone(&self.log),
            fail_navigation: self.fail_navigation,
            fail_show: self.fail_show,
        })
    }
}
