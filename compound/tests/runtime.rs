use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use compound::error::Result;
use compound::{Component, Error, EventContext, Runtime};
use hdom::{
    Document, DomError, Element, FiredTask, Key, ListenerKind, ListenerTarget, Modifiers, OwnerId,
    TaskKind, BODY_ID,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every delivery and optionally intercepts events.
struct Recorder {
    owner: OwnerId,
    name: &'static str,
    log: Log,
    stop: bool,
    prevent: bool,
    fail_tasks: bool,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            owner: OwnerId::next(),
            name,
            log: log.clone(),
            stop: false,
            prevent: false,
            fail_tasks: false,
        }
    }
}

impl Component for Recorder {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle_event(&mut self, _doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        let at = match cx.current_target() {
            ListenerTarget::Document => "document".to_string(),
            ListenerTarget::Element(id) => id.clone(),
        };
        self.log.borrow_mut().push(format!("{}@{}", self.name, at));
        if self.stop {
            cx.stop_propagation();
        }
        if self.prevent {
            cx.prevent_default();
        }
        let log = self.log.clone();
        let name = self.name;
        cx.defer(move || log.borrow_mut().push(format!("{name} deferred")));
        Ok(())
    }

    fn handle_task(&mut self, _doc: &mut Document, task: FiredTask) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("{} {:?} at {:?}", self.name, task.kind, task.at));
        if self.fail_tasks {
            return Err(DomError::NoSuchElement(self.name.to_string()).into());
        }
        Ok(())
    }
}

fn page() -> Runtime {
    let mut runtime = Runtime::new();
    let doc = runtime.document_mut();
    doc.mount(
        BODY_ID,
        Element::div()
            .id("panel")
            .child(Element::button().id("save").text_content("Save"))
            .child(Element::button().id("off").disabled(true))
            .child(Element::div().id("text")),
    )
    .unwrap();
    doc.mount(BODY_ID, Element::button().id("other")).unwrap();
    runtime
}

fn register(runtime: &mut Runtime, recorder: Recorder) -> OwnerId {
    runtime.register(Rc::new(RefCell::new(recorder)))
}

fn listen(runtime: &mut Runtime, owner: OwnerId, target: ListenerTarget, kind: ListenerKind) {
    runtime.document_mut().listeners.add(target, kind, owner);
}

fn element(id: &str) -> ListenerTarget {
    ListenerTarget::Element(id.to_string())
}

#[test]
fn test_click_bubbles_then_reaches_document() {
    let log = Log::default();
    let mut runtime = page();
    let owner = register(&mut runtime, Recorder::new("r", &log));
    listen(&mut runtime, owner, ListenerTarget::Document, ListenerKind::Click);
    listen(&mut runtime, owner, element("panel"), ListenerKind::Click);
    listen(&mut runtime, owner, element("save"), ListenerKind::Click);

    runtime.click("save").unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            "r@save",
            "r deferred",
            "r@panel",
            "r deferred",
            "r@document",
            "r deferred"
        ]
    );
}

#[test]
fn test_stop_propagation_halts_bubbling() {
    let log = Log::default();
    let mut runtime = page();
    let outer = register(&mut runtime, Recorder::new("outer", &log));
    let inner = register(
        &mut runtime,
        Recorder {
            stop: true,
            ..Recorder::new("inner", &log)
        },
    );
    listen(&mut runtime, outer, ListenerTarget::Document, ListenerKind::Click);
    listen(&mut runtime, outer, element("panel"), ListenerKind::Click);
    listen(&mut runtime, inner, element("save"), ListenerKind::Click);

    runtime.click("save").unwrap();
    assert_eq!(*log.borrow(), vec!["inner@save", "inner deferred"]);
}

#[test]
fn test_unregistered_owner_is_skipped() {
    let log = Log::default();
    let mut runtime = page();
    let owner = register(&mut runtime, Recorder::new("r", &log));
    listen(&mut runtime, owner, ListenerTarget::Document, ListenerKind::KeyDown);

    assert!(runtime.unregister(owner));
    runtime.press(Key::Char('x'), Modifiers::new()).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_tab_default_action_and_prevention() {
    let log = Log::default();
    let mut runtime = page();
    runtime.document_mut().focus("save");

    runtime.press(Key::Tab, Modifiers::new()).unwrap();
    assert_eq!(runtime.document().active_element(), Some("other"));
    runtime.press(Key::Tab, Modifiers::shift()).unwrap();
    assert_eq!(runtime.document().active_element(), Some("save"));

    let owner = register(
        &mut runtime,
        Recorder {
            prevent: true,
            ..Recorder::new("r", &log)
        },
    );
    listen(&mut runtime, owner, ListenerTarget::Document, ListenerKind::KeyDown);
    let flags = runtime.press(Key::Tab, Modifiers::new()).unwrap();
    assert!(flags.default_prevented);
    assert_eq!(runtime.document().active_element(), Some("save"));
}

#[test]
fn test_enter_and_space_click_buttons() {
    let log = Log::default();
    let mut runtime = page();
    let owner = register(&mut runtime, Recorder::new("r", &log));
    listen(&mut runtime, owner, element("save"), ListenerKind::Click);

    runtime.document_mut().focus("save");
    runtime.press(Key::Enter, Modifiers::new()).unwrap();
    runtime.press(Key::Char(' '), Modifiers::new()).unwrap();
    runtime.press(Key::Char('a'), Modifiers::new()).unwrap();

    let clicks = log.borrow().iter().filter(|l| *l == "r@save").count();
    assert_eq!(clicks, 2);
}

#[test]
fn test_pointer_down_moves_focus() {
    let mut runtime = page();

    runtime.pointer_down(Some("save")).unwrap();
    assert_eq!(runtime.document().active_element(), Some("save"));

    // Nothing focusable under the pointer
    runtime.pointer_down(Some("text")).unwrap();
    assert_eq!(runtime.document().active_element(), None);

    runtime.pointer_down(Some("other")).unwrap();
    runtime.pointer_down(None).unwrap();
    assert_eq!(runtime.document().active_element(), None);
}

#[test]
fn test_disabled_button_swallows_click() {
    let log = Log::default();
    let mut runtime = page();
    let owner = register(&mut runtime, Recorder::new("r", &log));
    listen(&mut runtime, owner, element("panel"), ListenerKind::Click);
    listen(&mut runtime, owner, ListenerTarget::Document, ListenerKind::PointerDown);

    runtime.click("off").unwrap();
    assert_eq!(*log.borrow(), vec!["r@document", "r deferred"]);
}

#[test]
fn test_advance_delivers_tasks_in_due_order() {
    let log = Log::default();
    let mut runtime = page();
    let owner = register(&mut runtime, Recorder::new("r", &log));

    let scheduler = &mut runtime.document_mut().scheduler;
    scheduler.set_timeout(owner, Duration::from_millis(40));
    scheduler.request_frame(owner);
    let cancelled = scheduler.set_timeout(owner, Duration::from_millis(10));
    scheduler.cancel(cancelled);

    runtime.advance(Duration::from_millis(30)).unwrap();
    assert_eq!(*log.borrow(), vec![format!("r {:?} at 16ms", TaskKind::Frame)]);

    runtime.advance(Duration::from_millis(10)).unwrap();
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(runtime.document().scheduler.now(), Duration::from_millis(40));
}

#[test]
fn test_failing_task_does_not_stall_the_clock() {
    let log = Log::default();
    let mut runtime = page();
    let mut broken = Recorder::new("broken", &log);
    broken.fail_tasks = true;
    let broken = register(&mut runtime, broken);
    let healthy = register(&mut runtime, Recorder::new("healthy", &log));

    let scheduler = &mut runtime.document_mut().scheduler;
    scheduler.set_timeout(broken, Duration::from_millis(10));
    scheduler.set_timeout(healthy, Duration::from_millis(20));

    let err = runtime.advance(Duration::from_millis(30)).unwrap_err();
    assert_eq!(err, Error::Dom(DomError::NoSuchElement("broken".into())));
    assert_eq!(
        *log.borrow(),
        vec![
            format!("broken {:?} at 10ms", TaskKind::Timer),
            format!("healthy {:?} at 20ms", TaskKind::Timer),
        ]
    );
    assert_eq!(runtime.document().scheduler.now(), Duration::from_millis(30));
    assert_eq!(runtime.document().scheduler.pending_count(), 0);
}
