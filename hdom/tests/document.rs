use hdom::{
    Document, DomError, Element, ListenerKind, ListenerTarget, Overflow, OwnerId, BODY_ID,
};

fn list_doc() -> Document {
    let mut doc = Document::new();
    doc.mount(
        BODY_ID,
        Element::list()
            .id("list")
            .max_height(3)
            .children((0..6).map(|i| Element::list_item().id(format!("item-{i}")).text_content(format!("Item {i}")))),
    )
    .unwrap();
    doc
}

// ============================================================================
// Tree
// ============================================================================

#[test]
fn test_mount_and_find() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::div().id("panel").child(Element::button().id("ok")))
        .unwrap();

    assert!(doc.exists("panel"));
    assert!(doc.exists("ok"));
    assert!(doc.contains("panel", "ok"));
    assert!(doc.contains("panel", "panel"));
    assert!(!doc.contains("ok", "panel"));
}

#[test]
fn test_mount_unknown_parent() {
    let mut doc = Document::new();
    let err = doc.mount("nowhere", Element::div()).unwrap_err();
    assert_eq!(err, DomError::NoSuchElement("nowhere".to_string()));
}

#[test]
fn test_mount_duplicate_id() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::div().id("a")).unwrap();

    let err = doc.mount(BODY_ID, Element::div().id("a")).unwrap_err();
    assert_eq!(err, DomError::DuplicateId("a".to_string()));

    // Duplicates within the incoming subtree are caught too
    let err = doc
        .mount(BODY_ID, Element::div().id("b").child(Element::div().id("b")))
        .unwrap_err();
    assert_eq!(err, DomError::DuplicateId("b".to_string()));
}

#[test]
fn test_ancestors_target_first() {
    let mut doc = Document::new();
    doc.mount(
        BODY_ID,
        Element::div().id("outer").child(Element::div().id("inner").child(Element::button().id("btn"))),
    )
    .unwrap();

    assert_eq!(doc.ancestors("btn"), vec!["btn", "inner", "outer", "body"]);
    assert!(doc.ancestors("missing").is_empty());
}

#[test]
fn test_unmount_body_is_rejected() {
    let mut doc = Document::new();
    assert_eq!(doc.unmount(BODY_ID).unwrap_err(), DomError::RootRemoval);
}

#[test]
fn test_unmount_blurs_removed_focus() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::div().id("panel").child(Element::button().id("ok")))
        .unwrap();
    assert!(doc.focus("ok"));

    let removed = doc.unmount("panel").unwrap();
    assert_eq!(removed.id, "panel");
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_unmount_drops_element_listeners() {
    let mut doc = Document::new();
    let owner = OwnerId::next();
    doc.mount(BODY_ID, Element::div().id("panel")).unwrap();

    let on_panel = doc
        .listeners
        .add(ListenerTarget::Element("panel".into()), ListenerKind::Click, owner);
    let on_doc = doc.listeners.add(ListenerTarget::Document, ListenerKind::KeyDown, owner);

    doc.unmount("panel").unwrap();

    assert!(!doc.listeners.contains(on_panel));
    assert!(doc.listeners.contains(on_doc));
}

#[test]
fn test_replace_keeps_position_and_focus() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::div().id("first")).unwrap();
    doc.mount(BODY_ID, Element::div().id("widget").child(Element::button().id("trigger")))
        .unwrap();
    doc.mount(BODY_ID, Element::div().id("last")).unwrap();
    doc.focus("trigger");

    doc.replace(
        "widget",
        Element::div()
            .id("widget")
            .attr("data-state", "open")
            .child(Element::button().id("trigger")),
    )
    .unwrap();

    let ids: Vec<_> = doc.body().child_elements().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "widget", "last"]);
    assert_eq!(doc.attr("widget", "data-state"), Some("open"));
    assert_eq!(doc.active_element(), Some("trigger"));
}

#[test]
fn test_set_and_remove_attr() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::div().id("d")).unwrap();

    doc.set_attr("d", "data-state", "closed").unwrap();
    assert_eq!(doc.attr("d", "data-state"), Some("closed"));
    assert_eq!(doc.remove_attr("d", "data-state").unwrap(), Some("closed".to_string()));
    assert!(doc.set_attr("missing", "x", "y").is_err());
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_into_view_down_and_up() {
    let mut doc = list_doc();

    // Visible already: no scroll
    assert_eq!(doc.scroll_into_view("list", "item-2").unwrap(), 0);

    // Below the viewport: scroll just enough
    assert_eq!(doc.scroll_into_view("list", "item-4").unwrap(), 2);
    assert_eq!(doc.scroll_top("list"), 2);

    // Above the viewport: align to top
    assert_eq!(doc.scroll_into_view("list", "item-1").unwrap(), 1);
}

#[test]
fn test_scroll_to_top() {
    let mut doc = list_doc();
    doc.scroll_into_view("list", "item-5").unwrap();
    assert_eq!(doc.scroll_top("list"), 3);

    doc.scroll_to_top("list").unwrap();
    assert_eq!(doc.scroll_top("list"), 0);
}

#[test]
fn test_scroll_into_view_counts_nested_leaves() {
    let mut doc = Document::new();
    doc.mount(
        BODY_ID,
        Element::list()
            .id("list")
            .max_height(2)
            .child(
                Element::list_item()
                    .id("group")
                    .child(Element::list_item().id("caption").text_content("Fruit"))
                    .child(Element::list_item().id("apple").text_content("Apple"))
                    .child(Element::list_item().id("pear").text_content("Pear")),
            ),
    )
    .unwrap();

    // caption=0, apple=1, pear=2
    assert_eq!(doc.scroll_into_view("list", "pear").unwrap(), 1);
    assert_eq!(doc.scroll_into_view("list", "caption").unwrap(), 0);
}

#[test]
fn test_scroll_into_view_outside_container() {
    let mut doc = list_doc();
    doc.mount(BODY_ID, Element::div().id("other")).unwrap();
    assert!(doc.scroll_into_view("list", "other").is_err());
}

// ============================================================================
// Scroll lock
// ============================================================================

#[test]
fn test_scroll_lock_is_reference_counted() {
    let mut doc = Document::new();
    doc.set_body_overflow(Overflow::Auto);

    let first = doc.lock_scroll();
    let second = doc.lock_scroll();
    assert_eq!(doc.body_overflow(), Overflow::Hidden);
    assert_eq!(doc.scroll_lock_holders(), 2);

    assert!(doc.unlock_scroll(first));
    assert_eq!(doc.body_overflow(), Overflow::Hidden);

    assert!(doc.unlock_scroll(second));
    assert_eq!(doc.body_overflow(), Overflow::Auto);
    assert!(!doc.scroll_locked());
}

#[test]
fn test_scroll_lock_foreign_token_is_rejected() {
    let mut a = Document::new();
    let mut b = Document::new();
    let _held = b.lock_scroll();
    let token = b.lock_scroll();

    // Token ids overlap between locks, but `a` holds nothing
    assert!(!a.unlock_scroll(token));
    assert_eq!(a.body_overflow(), Overflow::Visible);
}

#[test]
fn test_content_height_saturates() {
    let tall = Element::list()
        .id("tall")
        .child(Element::list_item().id("a").height(40_000))
        .child(Element::list_item().id("b").height(40_000));
    assert_eq!(hdom::scroll::content_height(&tall), u16::MAX);

    let short = Element::list()
        .child(Element::list_item().height(2))
        .child(Element::list_item().height(3));
    assert_eq!(hdom::scroll::content_height(&short), 5);
}
