use std::sync::Arc;

use super::{handle_for, insert_plain, new_session, test_wait};
use crate::element::{ElementConfig, PageElement};
use crate::errors::ElementError;
use crate::mock::{MockElement, MockSession};
use crate::selector::Selector;
use crate::session::RemoteSession;
use crate::typed::{CheckboxElement, ElementKind};
use crate::{ElementHandle, Page};

fn page_for(session: &Arc<MockSession>) -> Page {
    Page::new(session.clone() as Arc<dyn RemoteSession>).with_wait(test_wait())
}

fn insert_checkbox(session: &MockSession, id: &str) {
    session.insert(id, MockElement::new("input").with_attribute("type", "checkbox"));
}

#[tokio::test]
async fn cast_shares_parent_and_selector() {
    let session = new_session();
    insert_plain(&session, "root");
    insert_checkbox(&session, "a");

    let parent = handle_for(&session, "root", Some(Selector::id("root")));
    let handle = super::child_handle_for(&session, "a", Selector::css(".accept"), parent);
    let cast = handle
        .cast(ElementKind::Checkbox, ElementConfig::default())
        .await
        .unwrap();

    assert_eq!(cast.kind(), ElementKind::Checkbox);
    assert_eq!(cast.handle().selector(), Some(&Selector::css(".accept")));
    assert_eq!(cast.handle().parent().unwrap().remote_id(), "root");
    assert_eq!(cast.handle().remote_id(), handle.remote_id());
}

#[tokio::test]
async fn cast_to_generic_keeps_the_handle() {
    let session = new_session();
    insert_plain(&session, "a");

    let handle = handle_for(&session, "a", Some(Selector::css(".x")));
    let cast = handle
        .cast(ElementKind::Generic, ElementConfig::default())
        .await
        .unwrap();

    assert_eq!(cast.kind(), ElementKind::Generic);
    assert_eq!(cast.handle().selector(), Some(&Selector::css(".x")));
}

#[tokio::test]
async fn cast_rejects_unsuitable_elements() {
    let session = new_session();
    session.insert("a", MockElement::new("input").with_attribute("type", "text"));

    let handle = handle_for(&session, "a", None);
    let error = handle
        .cast(ElementKind::Checkbox, ElementConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(error, ElementError::InvalidArgument(_)));

    let error = handle
        .cast(ElementKind::Dropdown, ElementConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(error, ElementError::InvalidArgument(_)));
}

#[tokio::test]
async fn checkbox_set_clicks_only_on_state_change() {
    let session = new_session();
    insert_checkbox(&session, "a");

    let checkbox = CheckboxElement::new(handle_for(&session, "a", None)).await.unwrap();

    checkbox.set(false).await.unwrap();
    assert!(session.clicked().is_empty());

    checkbox.check().await.unwrap();
    assert_eq!(session.clicked(), vec!["a".to_string()]);
    assert!(checkbox.is_checked().await.unwrap());

    // Already checked, no second click.
    checkbox.set(true).await.unwrap();
    assert_eq!(session.clicked().len(), 1);

    checkbox.uncheck().await.unwrap();
    assert_eq!(session.clicked().len(), 2);
    assert!(!checkbox.is_checked().await.unwrap());
}

#[tokio::test]
async fn dropdown_caches_options_until_invalidated() {
    let session = new_session();
    session.insert("menu", MockElement::new("select"));
    session.insert("o1", MockElement::new("option").with_text("One"));
    session.insert("o2", MockElement::new("option").with_text("Two"));
    session.set_match(Selector::tag("option"), &["o1", "o2"]);

    let handle = handle_for(&session, "menu", Some(Selector::tag("select")));
    let dropdown = handle
        .cast(ElementKind::Dropdown, ElementConfig::default())
        .await
        .unwrap();
    let dropdown = dropdown.as_dropdown().unwrap();

    assert_eq!(dropdown.options().await.unwrap(), vec!["One", "Two"]);

    // Cached: a text change is not observed until the cache is dropped.
    session.set_text("o1", "Uno");
    assert_eq!(dropdown.options().await.unwrap(), vec!["One", "Two"]);

    dropdown.invalidate();
    assert_eq!(dropdown.options().await.unwrap(), vec!["Uno", "Two"]);
}

#[tokio::test]
async fn dropdown_select_clicks_the_matching_option() {
    let session = new_session();
    session.insert("menu", MockElement::new("select"));
    session.insert("o1", MockElement::new("option").with_text("One"));
    session.insert("o2", MockElement::new("option").with_text("Two"));
    session.set_match(Selector::tag("option"), &["o1", "o2"]);
    session.set_match(Selector::xpath(".//option[text()='Two']"), &["o2"]);

    let dropdown = crate::DropdownElement::new(handle_for(&session, "menu", None))
        .await
        .unwrap();

    dropdown.select("Two").await.unwrap();
    assert_eq!(session.clicked(), vec!["o2".to_string()]);
    assert_eq!(dropdown.selected_option().await.unwrap().as_deref(), Some("Two"));
}

#[tokio::test]
async fn textbox_fill_replaces_the_value() {
    let session = new_session();
    session.insert(
        "a",
        MockElement::new("input").with_attribute("value", "old"),
    );

    let textbox = crate::TextBoxElement::new(handle_for(&session, "a", None))
        .await
        .unwrap();

    textbox.fill("fresh").await.unwrap();
    assert_eq!(textbox.value().await.unwrap(), "fresh");
    assert_eq!(session.typed(), vec![("a".to_string(), "fresh".to_string())]);
}

#[tokio::test]
async fn find_uses_the_default_selector_of_the_type() {
    let session = new_session();
    let page = page_for(&session);

    let query = CheckboxElement::find(&page).unwrap();
    assert_eq!(
        query.selector(),
        &Selector::xpath("//input[@type='checkbox']")
    );

    // The generic handle has no default selector to search by.
    let error = ElementHandle::find(&page).unwrap_err();
    assert!(matches!(error, ElementError::NoSelector(_)));
}

#[tokio::test]
async fn reload_reruns_normalize_on_the_fresh_element() {
    let session = new_session();
    insert_checkbox(&session, "a");
    session.insert("b", MockElement::new("input").with_attribute("type", "text"));
    session.set_match(Selector::css(".accept"), &["b"]);

    let checkbox = CheckboxElement::new(handle_for(
        &session,
        "a",
        Some(Selector::css(".accept")),
    ))
    .await
    .unwrap();

    // The selector now resolves to a non-checkbox; normalize rejects it.
    session.detach("a");
    let error = checkbox.reload().await.unwrap_err();
    assert!(matches!(error, ElementError::InvalidArgument(_)));
}
