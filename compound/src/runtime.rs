//! Event routing between the document and mounted components.
//!
//! Dispatch order for one event:
//! 1. Element listeners along the target's ancestor path (bubbling)
//! 2. Document listeners, unless propagation was stopped
//! 3. The native default action, unless it was prevented

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use hdom::{
    Document, Event, EventFlags, FiredTask, Key, ListenerId, ListenerTarget, Modifiers,
    MouseButton, OwnerId, Tag, TabDirection, FRAME_INTERVAL,
};

use crate::error::Result;

// =============================================================================
// Component
// =============================================================================

/// Something that owns listeners and scheduled tasks in a document.
pub trait Component {
    fn owner(&self) -> OwnerId;

    /// Handle an event delivered through one of this component's listeners.
    fn handle_event(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()>;

    /// Handle a frame or timer this component scheduled.
    fn handle_task(&mut self, doc: &mut Document, task: FiredTask) -> Result<()> {
        let _ = (doc, task);
        Ok(())
    }
}

// =============================================================================
// EventContext
// =============================================================================

type Deferred = Box<dyn FnOnce()>;

/// The event being delivered, plus the flags listeners may set.
pub struct EventContext {
    event: Event,
    target: Option<String>,
    current_target: ListenerTarget,
    listener: Option<ListenerId>,
    flags: EventFlags,
    deferred: Vec<Deferred>,
}

impl EventContext {
    fn new(event: Event, target: Option<String>) -> Self {
        Self {
            event,
            target,
            current_target: ListenerTarget::Document,
            listener: None,
            flags: EventFlags::default(),
            deferred: Vec::new(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Element the event was dispatched at.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Where the listener being invoked is attached.
    pub fn current_target(&self) -> &ListenerTarget {
        &self.current_target
    }

    /// The listener being invoked.
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn key(&self) -> Option<(Key, Modifiers)> {
        match self.event {
            Event::KeyDown { key, modifiers } => Some((key, modifiers)),
            _ => None,
        }
    }

    pub fn prevent_default(&mut self) {
        self.flags.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.flags.propagation_stopped = true;
    }

    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Queue a user callback. It runs once the component that queued it is
    /// no longer borrowed, so the callback may freely use component handles.
    pub fn defer(&mut self, callback: impl FnOnce() + 'static) {
        self.deferred.push(Box::new(callback));
    }
}

// =============================================================================
// Runtime
// =============================================================================

/// Owns the document and routes events and fired tasks to components.
#[derive(Default)]
pub struct Runtime {
    document: Document,
    components: HashMap<OwnerId, Rc<RefCell<dyn Component>>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            components: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn register(&mut self, component: Rc<RefCell<dyn Component>>) -> OwnerId {
        let owner = component.borrow().owner();
        log::debug!("[runtime] register {}", owner);
        self.components.insert(owner, component);
        owner
    }

    pub fn unregister(&mut self, owner: OwnerId) -> bool {
        self.components.remove(&owner).is_some()
    }

    pub fn is_registered(&self, owner: OwnerId) -> bool {
        self.components.contains_key(&owner)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Dispatch an event and run its default action.
    pub fn dispatch(&mut self, event: Event) -> Result<EventFlags> {
        let target = match &event {
            Event::KeyDown { .. } => self.document.active_element().map(str::to_string),
            Event::PointerDown { target, .. } | Event::Click { target, .. } => target.clone(),
        };
        log::trace!("[runtime] dispatch {:?} at {:?}", event, target);

        let mut cx = EventContext::new(event, target);
        let kind = cx.event.kind();

        let path = cx
            .target
            .as_deref()
            .map(|id| self.document.ancestors(id))
            .unwrap_or_default();

        for node in path {
            let current = ListenerTarget::Element(node);
            self.deliver(&mut cx, current, kind)?;
            if cx.flags.propagation_stopped {
                break;
            }
        }

        if !cx.flags.propagation_stopped {
            self.deliver(&mut cx, ListenerTarget::Document, kind)?;
        }

        let flags = cx.flags;
        if !flags.default_prevented {
            self.default_action(&cx.event, cx.target.as_deref())?;
        }
        Ok(flags)
    }

    fn deliver(&mut self, cx: &mut EventContext, current: ListenerTarget, kind: hdom::ListenerKind) -> Result<()> {
        let listeners = self.document.listeners.for_target(&current, kind);
        cx.current_target = current;

        for (listener, owner) in listeners {
            // An earlier listener may have removed this one
            if !self.document.listeners.contains(listener) {
                continue;
            }
            let Some(component) = self.components.get(&owner).cloned() else {
                log::warn!("[runtime] listener {:?} has no registered owner {}", listener, owner);
                continue;
            };

            cx.listener = Some(listener);
            component.borrow_mut().handle_event(&mut self.document, cx)?;

            for callback in cx.deferred.drain(..) {
                callback();
            }
        }
        Ok(())
    }

    fn default_action(&mut self, event: &Event, target: Option<&str>) -> Result<()> {
        match event {
            Event::KeyDown { key, .. } => {
                if let Some(direction) = event.tab_direction() {
                    let moved = match direction {
                        TabDirection::Forward => self.document.focus_next(),
                        TabDirection::Backward => self.document.focus_prev(),
                    };
                    log::trace!("[runtime] native tab -> {:?}", moved);
                    return Ok(());
                }

                // Enter and Space activate buttons
                if matches!(key, Key::Enter | Key::Char(' ')) {
                    if let Some(id) = target.filter(|id| self.is_enabled_button(id)) {
                        let id = id.to_string();
                        self.dispatch(Event::Click {
                            target: Some(id),
                            button: MouseButton::Left,
                        })?;
                    }
                }
            }
            Event::PointerDown { target, .. } => {
                let focusable = target.as_deref().and_then(|id| {
                    self.document
                        .ancestors(id)
                        .into_iter()
                        .find(|a| self.document.find(a).is_some_and(hdom::accepts_focus))
                });
                match focusable {
                    Some(id) => {
                        self.document.focus(&id);
                    }
                    None => {
                        self.document.blur();
                    }
                }
            }
            Event::Click { .. } => {}
        }
        Ok(())
    }

    fn is_enabled_button(&self, id: &str) -> bool {
        self.document
            .find(id)
            .is_some_and(|el| el.tag == Tag::Button && !el.disabled)
    }

    /// Press a key at the active element.
    pub fn press(&mut self, key: Key, modifiers: Modifiers) -> Result<EventFlags> {
        self.dispatch(Event::KeyDown { key, modifiers })
    }

    pub fn pointer_down(&mut self, target: Option<&str>) -> Result<EventFlags> {
        self.dispatch(Event::PointerDown {
            target: target.map(str::to_string),
            button: MouseButton::Left,
        })
    }

    /// Full pointer click: pointer-down, then click.
    ///
    /// Disabled controls swallow the click itself, the same way a disabled
    /// button ignores activation.
    pub fn click(&mut self, target: &str) -> Result<()> {
        self.pointer_down(Some(target))?;
        let disabled = self
            .document
            .ancestors(target)
            .iter()
            .filter_map(|id| self.document.find(id))
            .any(|el| el.disabled);
        if disabled {
            log::trace!("[runtime] click on disabled {} swallowed", target);
            return Ok(());
        }
        self.dispatch(Event::Click {
            target: Some(target.to_string()),
            button: MouseButton::Left,
        })?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Advance virtual time, delivering every frame and timer that falls due.
    /// Tasks scheduled while delivering fire in the same call if they are due
    /// before the new time.
    ///
    /// A failing task does not hold up the others: every due task is still
    /// delivered and the clock still reaches the new time. The first error is
    /// returned afterwards.
    pub fn advance(&mut self, by: Duration) -> Result<()> {
        let deadline = self.document.scheduler.now() + by;
        let mut first_error = None;
        while let Some(task) = self.document.scheduler.next_due(deadline) {
            let Some(component) = self.components.get(&task.owner).cloned() else {
                log::warn!("[runtime] task {:?} has no registered owner {}", task.id, task.owner);
                continue;
            };
            if let Err(err) = component.borrow_mut().handle_task(&mut self.document, task) {
                log::warn!("[runtime] task for {} failed: {}", task.owner, err);
                first_error.get_or_insert(err);
            }
        }
        self.document.scheduler.set_now(deadline);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Advance by one animation frame.
    pub fn advance_frame(&mut self) -> Result<()> {
        self.advance(FRAME_INTERVAL)
    }
}
