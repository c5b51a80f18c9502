use hdom::event::from_key_event;
use hdom::{
    accepts_focus, collect_focusable, is_tabbable, Document, Element, Event, Key, Modifiers,
    MouseButton, TabDirection, BODY_ID,
};

// ============================================================================
// Focusability predicate
// ============================================================================

#[test]
fn test_tabbable_tags() {
    assert!(is_tabbable(&Element::button()));
    assert!(is_tabbable(&Element::input()));
    assert!(is_tabbable(&Element::anchor("/home")));
    assert!(!is_tabbable(&Element::div()));
    assert!(!is_tabbable(&Element::text("hello")));
}

#[test]
fn test_anchor_without_href_is_not_tabbable() {
    let mut anchor = Element::anchor("/x");
    anchor.attrs.remove("href");
    assert!(!is_tabbable(&anchor));
}

#[test]
fn test_tab_index_rules() {
    assert!(is_tabbable(&Element::div().tab_index(0)));
    assert!(is_tabbable(&Element::div().tab_index(2)));
    assert!(!is_tabbable(&Element::div().tab_index(-1)));
    assert!(!is_tabbable(&Element::button().tab_index(-1)));

    // -1 still accepts programmatic focus
    assert!(accepts_focus(&Element::div().tab_index(-1)));
    assert!(!accepts_focus(&Element::div()));
}

#[test]
fn test_disabled_is_never_focusable() {
    assert!(!is_tabbable(&Element::button().disabled(true)));
    assert!(!is_tabbable(&Element::div().tab_index(0).disabled(true)));
    assert!(!accepts_focus(&Element::div().tab_index(-1).disabled(true)));
}

#[test]
fn test_collect_focusable_tree_order_excludes_root() {
    let root = Element::div()
        .id("root")
        .tab_index(0)
        .child(Element::button().id("a"))
        .child(
            Element::div()
                .id("wrap")
                .child(Element::input().id("b"))
                .child(Element::button().id("skip").disabled(true)),
        )
        .child(Element::div().id("c").tab_index(0))
        .child(Element::div().id("d").tab_index(-1));

    assert_eq!(collect_focusable(&root), vec!["a", "b", "c"]);
}

// ============================================================================
// Document focus
// ============================================================================

#[test]
fn test_document_focus_rules() {
    let mut doc = Document::new();
    doc.mount(
        BODY_ID,
        Element::div()
            .id("panel")
            .tab_index(-1)
            .child(Element::button().id("ok"))
            .child(Element::text("plain").id("plain")),
    )
    .unwrap();

    assert!(doc.focus("panel"));
    assert!(doc.focus("ok"));
    assert_eq!(doc.active_element(), Some("ok"));

    assert!(!doc.focus("plain"));
    assert!(!doc.focus("missing"));
    assert_eq!(doc.active_element(), Some("ok"));

    assert!(doc.blur());
    assert!(!doc.blur());
}

#[test]
fn test_native_tab_order_wraps() {
    let mut doc = Document::new();
    doc.mount(BODY_ID, Element::button().id("one")).unwrap();
    doc.mount(BODY_ID, Element::button().id("two")).unwrap();
    doc.mount(BODY_ID, Element::button().id("three")).unwrap();

    assert_eq!(doc.focus_next(), Some("one".to_string()));
    assert_eq!(doc.focus_next(), Some("two".to_string()));
    assert_eq!(doc.focus_next(), Some("three".to_string()));
    assert_eq!(doc.focus_next(), Some("one".to_string()));
    assert_eq!(doc.focus_prev(), Some("three".to_string()));
}

#[test]
fn test_native_tab_order_empty_document() {
    let mut doc = Document::new();
    assert_eq!(doc.focus_next(), None);
    assert_eq!(doc.focus_prev(), None);
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_tab_direction() {
    assert_eq!(Event::key(Key::Tab).tab_direction(), Some(TabDirection::Forward));
    assert_eq!(
        Event::KeyDown {
            key: Key::Tab,
            modifiers: Modifiers::shift()
        }
        .tab_direction(),
        Some(TabDirection::Backward)
    );
    assert_eq!(Event::key(Key::BackTab).tab_direction(), Some(TabDirection::Backward));
    assert_eq!(Event::key(Key::Enter).tab_direction(), None);
    assert_eq!(
        Event::Click {
            target: None,
            button: MouseButton::Left
        }
        .tab_direction(),
        None
    );
}

#[test]
fn test_crossterm_key_conversion() {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    let press = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(from_key_event(&press), Some(Event::key(Key::Escape)));

    let shifted = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(
        from_key_event(&shifted),
        Some(Event::KeyDown {
            key: Key::BackTab,
            modifiers: Modifiers::shift()
        })
    );

    let release = KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    assert_eq!(from_key_event(&release), None);
}
