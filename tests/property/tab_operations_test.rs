//! Property-based tests for Tab Manager operations.
//!
//! These tests verify the tab strip invariants: for any sequence of opens,
//! closes and switches, at least one tab remains, exactly one tab is active
//! and visible, and the address display shows the active tab's URL.

#[path = "../support/mod.rs"]
mod support;

use kyobrowser::managers::tab_manager::TabManager;
use proptest::prelude::*;
use support::{Call, FakeFactory, FakeView};

/// Operations that can be performed on the TabManager.
#[derive(Debug, Clone)]
enum TabOp {
    Open(String),
    Close(usize), // index into the current strip
    Activate(usize),
    Navigate(String),
}

fn arb_url() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|host| format!("https://{}.test/", host))
}

/// Strategy for generating a sequence of tab operations.
fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => arb_url().prop_map(TabOp::Open),
            3 => (0..20usize).prop_map(TabOp::Close),
            2 => (0..20usize).prop_map(TabOp::Activate),
            1 => arb_url().prop_map(TabOp::Navigate),
        ],
        1..60,
    )
}

/// The most recent visibility call made on `id`.
fn last_visibility(factory: &FakeFactory, id: kyobrowser::types::tab::TabId) -> Option<bool> {
    factory.calls_for(id).into_iter().rev().find_map(|c| match c {
        Call::SetVisible(v) => Some(v),
        _ => None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn tab_strip_invariants_hold(ops in arb_tab_ops()) {
        let mut factory = FakeFactory::new();
        let mut manager: TabManager<FakeView> = TabManager::new();
        manager.open("https://start.test/", &mut factory).unwrap();

        for op in &ops {
            let before = manager.ids();
            match op {
                TabOp::Open(url) => {
                    let id = manager.open(url, &mut factory).unwrap();
                    prop_assert_eq!(manager.len(), before.len() + 1);
                    prop_assert_eq!(manager.active(), Some(id));
                }
                TabOp::Close(idx) => {
                    let id = before[idx % before.len()];
                    let closed = manager.close(id).unwrap();
                    prop_assert_eq!(closed, before.len() > 1);
                    let expected = if closed { before.len() - 1 } else { before.len() };
                    prop_assert_eq!(manager.len(), expected);
                }
                TabOp::Activate(idx) => {
                    let id = before[idx % before.len()];
                    manager.activate(id).unwrap();
                    prop_assert_eq!(manager.active(), Some(id));
                }
                TabOp::Navigate(url) => {
                    manager.navigate_active(url).unwrap();
                }
            }

            prop_assert!(!manager.is_empty(), "strip emptied after {:?}", op);
            let active = manager.active().expect("an active tab");
            prop_assert!(manager.ids().contains(&active));
            prop_assert_eq!(Some(manager.address()), manager.url_of(active));

            for id in manager.ids() {
                prop_assert_eq!(last_visibility(&factory, id), Some(id == active));
            }
        }
    }
}
