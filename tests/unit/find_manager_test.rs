//! Unit tests for the find-in-page session.

#[path = "../support/mod.rs"]
mod support;

use kyobrowser::managers::find_manager::FindManager;
use kyobrowser::types::find::{FindDirection, FindKeyAction, FindQuery};
use kyobrowser::types::tab::TabId;
use kyobrowser::view::ViewFactory;
use support::{Call, FakeFactory, FakeView};

fn setup() -> (FindManager, FakeFactory, FakeView, TabId) {
    let mut factory = FakeFactory::new();
    let id = TabId::new();
    let view = factory.create_view(id).unwrap();
    (FindManager::new(), factory, view, id)
}

#[test]
fn test_search_clears_then_finds_with_flags() {
    let (mut find, factory, view, id) = setup();
    find.open();
    find.set_case_sensitive(true);
    find.set_whole_word(true);

    assert!(find.search(Some(&view), "needle", FindDirection::Backward).unwrap());
    assert_eq!(
        factory.calls_for(id),
        vec![
            Call::ClearFind,
            Call::Find(FindQuery {
                text: "needle".to_string(),
                case_sensitive: true,
                whole_word: true,
                direction: FindDirection::Backward,
            }),
        ]
    );
    assert_eq!(find.state().query, "needle");
}

#[test]
fn test_empty_search_is_noop() {
    let (mut find, factory, view, id) = setup();
    assert!(!find.search(Some(&view), "", FindDirection::Forward).unwrap());
    assert!(factory.calls_for(id).is_empty());
}

#[test]
fn test_search_without_view_is_noop() {
    let mut find = FindManager::new();
    assert!(!find.search::<FakeView>(None, "needle", FindDirection::Forward).unwrap());
    assert_eq!(find.state().query, "");
}

#[test]
fn test_toggling_flags_does_not_search() {
    let (mut find, factory, _view, id) = setup();
    find.set_case_sensitive(true);
    find.set_whole_word(true);
    assert!(factory.calls_for(id).is_empty());
    assert!(find.state().case_sensitive);
    assert!(find.state().whole_word);
}

#[test]
fn test_close_is_idempotent() {
    let (mut find, factory, view, id) = setup();
    find.open();
    find.search(Some(&view), "needle", FindDirection::Forward).unwrap();

    find.close(Some(&view)).unwrap();
    let once = find.state().clone();
    find.close(Some(&view)).unwrap();

    assert_eq!(find.state(), &once);
    assert!(!once.visible);
    assert_eq!(once.query, "");
    assert_eq!(factory.last_call_for(id), Some(Call::ClearFind));
}

#[test]
fn test_open_reports_visibility_change() {
    let mut find = FindManager::new();
    assert!(find.open());
    assert!(!find.open());
    assert!(find.is_visible());
}

#[test]
fn test_key_mapping() {
    assert_eq!(
        FindManager::action_for_key("Enter", false),
        Some(FindKeyAction::Search(FindDirection::Forward))
    );
    assert_eq!(
        FindManager::action_for_key("Enter", true),
        Some(FindKeyAction::Search(FindDirection::Backward))
    );
    assert_eq!(FindManager::action_for_key("Escape", false), Some(FindKeyAction::Close));
    assert_eq!(FindManager::action_for_key("a", false), None);
}
