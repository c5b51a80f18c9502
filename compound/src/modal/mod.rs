//! Modal dialog: overlay, focus-trapped content and a timed lifecycle.
//!
//! The host owns `is_open` and reacts to `on_close`. The modal never closes
//! itself; Escape, overlay clicks and close buttons only report the request.

mod parts;

use std::cell::RefCell;
use std::rc::Rc;

use hdom::{
    generate_id, Document, DomError, Element, FiredTask, Key, ListenerId, ListenerKind,
    ListenerTarget, OwnerId, ScrollLockToken,
};

use crate::config::ModalConfig;
use crate::context::RenderContext;
use crate::error::Result;
use crate::focus_trap::{FocusMemory, FocusTrap};
use crate::lifecycle::{DialogState, Effect, Input, LifecycleController, Phase};
use crate::runtime::{Component, EventContext, Runtime};

pub use parts::{
    ModalBody, ModalCloseButton, ModalContent, ModalFooter, ModalHeader, ModalPart,
    RenderedContent,
};

type Callback = Rc<dyn Fn()>;

/// Element ids of one modal instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalIds {
    /// Backdrop; the portal child.
    pub overlay: String,
    /// Dialog surface.
    pub content: String,
    /// Header region, the dialog's label.
    pub title: String,
    /// Body region, the dialog's description.
    pub description: String,
}

impl ModalIds {
    fn new(base: &str) -> Self {
        Self {
            overlay: format!("{base}-overlay"),
            content: format!("{base}-content"),
            title: format!("{base}-title"),
            description: format!("{base}-description"),
        }
    }

    /// Default id of the `index`-th close button.
    pub fn close_button(&self, index: usize) -> String {
        format!("{}-close-{}", self.content, index)
    }
}

/// What modal parts can see while rendering.
#[derive(Debug, Clone)]
pub struct ModalScope {
    ids: ModalIds,
    close_label: String,
    visible: bool,
}

impl ModalScope {
    pub fn new(ids: ModalIds, close_label: impl Into<String>, visible: bool) -> Self {
        Self {
            ids,
            close_label: close_label.into(),
            visible,
        }
    }

    pub fn ids(&self) -> &ModalIds {
        &self.ids
    }

    pub fn close_label(&self) -> &str {
        &self.close_label
    }

    /// The lifecycle's visibility flag.
    pub fn visible(&self) -> bool {
        self.visible
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Default)]
pub struct ModalBuilder {
    config: ModalConfig,
    content: ModalContent,
    on_close: Option<Callback>,
    open: bool,
}

impl ModalBuilder {
    pub fn config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn content(mut self, content: ModalContent) -> Self {
        self.content = content;
        self
    }

    pub fn on_close(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(callback));
        self
    }

    /// Initial value of `is_open`.
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Register the modal with the runtime, opening it right away if
    /// requested.
    pub fn build(self, runtime: &mut Runtime) -> Result<Modal> {
        let owner = OwnerId::next();
        let ids = ModalIds::new(&generate_id("modal"));
        let inner = ModalInner {
            owner,
            trap: FocusTrap::new(&ids.content),
            ids,
            config: self.config,
            content: self.content,
            on_close: self.on_close,
            is_open: false,
            lifecycle: LifecycleController::new(),
            memory: None,
            scroll_lock: None,
            listeners: ModalListeners::default(),
        };
        let modal = Modal {
            inner: Rc::new(RefCell::new(inner)),
        };
        runtime.register(modal.inner.clone());

        if self.open {
            modal.set_open(runtime, true)?;
        }
        Ok(modal)
    }
}

// =============================================================================
// Modal
// =============================================================================

/// Handle to a mounted modal. Cheap to clone.
#[derive(Clone)]
pub struct Modal {
    inner: Rc<RefCell<ModalInner>>,
}

impl std::fmt::Debug for Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Modal")
            .field("ids", &inner.ids)
            .field("is_open", &inner.is_open)
            .field("phase", &inner.lifecycle.phase())
            .finish()
    }
}

impl Modal {
    pub fn builder() -> ModalBuilder {
        ModalBuilder::default()
    }

    /// Drive the caller-controlled open flag.
    ///
    /// An open that cannot be mounted (missing portal container, content ids
    /// already in the document) is an error and leaves the modal closed.
    pub fn set_open(&self, runtime: &mut Runtime, open: bool) -> Result<()> {
        self.inner
            .borrow_mut()
            .set_open(runtime.document_mut(), open)
    }

    pub fn open(&self, runtime: &mut Runtime) -> Result<()> {
        self.set_open(runtime, true)
    }

    pub fn close(&self, runtime: &mut Runtime) -> Result<()> {
        self.set_open(runtime, false)
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().lifecycle.phase()
    }

    pub fn state(&self) -> DialogState {
        let inner = self.inner.borrow();
        DialogState::new(inner.is_open, inner.lifecycle.phase())
    }

    pub fn ids(&self) -> ModalIds {
        self.inner.borrow().ids.clone()
    }

    pub fn owner(&self) -> OwnerId {
        self.inner.borrow().owner
    }

    /// Tear the modal down immediately, skipping the exit transition, and
    /// unregister it.
    pub fn destroy(&self, runtime: &mut Runtime) -> Result<()> {
        let owner = {
            let mut inner = self.inner.borrow_mut();
            inner.teardown(runtime.document_mut())?;
            inner.owner
        };
        runtime.unregister(owner);
        Ok(())
    }
}

// =============================================================================
// Inner
// =============================================================================

#[derive(Debug, Default)]
struct ModalListeners {
    escape: Option<ListenerId>,
    overlay_click: Option<ListenerId>,
    content_click: Option<ListenerId>,
    close_buttons: Vec<ListenerId>,
}

struct ModalInner {
    owner: OwnerId,
    ids: ModalIds,
    config: ModalConfig,
    content: ModalContent,
    on_close: Option<Callback>,
    is_open: bool,
    lifecycle: LifecycleController,
    trap: FocusTrap,
    memory: Option<FocusMemory>,
    scroll_lock: Option<ScrollLockToken>,
    listeners: ModalListeners,
}

impl ModalInner {
    fn set_open(&mut self, doc: &mut Document, open: bool) -> Result<()> {
        if open == self.is_open {
            return Ok(());
        }
        if open
            && self.lifecycle.phase() == Phase::Closed
            && !doc.exists(&self.config.portal_container)
        {
            return Err(DomError::NoSuchElement(self.config.portal_container.clone()).into());
        }

        let from = self.lifecycle.phase();
        self.is_open = open;
        let input = if open { Input::Open } else { Input::Close };
        let effects = self.lifecycle.apply(doc, self.owner, input);
        let result = self.perform(doc, effects);
        if result.is_err() && open && from == Phase::Closed {
            self.abort_open(doc);
        }
        result
    }

    /// Undo a partially performed open so the modal is closed again.
    fn abort_open(&mut self, doc: &mut Document) {
        log::warn!("[modal] {} failed to open, rolling back", self.ids.content);
        self.lifecycle.reset(doc);
        self.is_open = false;
        self.detach(doc);
        if doc.exists(&self.ids.overlay) {
            let _ = doc.unmount(&self.ids.overlay);
        }
        if let Some(token) = self.scroll_lock.take() {
            doc.unlock_scroll(token);
        }
        // Focus never moved, so there is nothing to restore
        self.memory = None;
    }

    fn scope(&self) -> ModalScope {
        ModalScope::new(
            self.ids.clone(),
            &self.config.close_label,
            self.lifecycle.phase() == Phase::Open,
        )
    }

    fn render(&self) -> Result<(Element, Vec<String>)> {
        let scope = self.scope();
        let cx = RenderContext::new().with_modal(&scope);
        let rendered = self.content.render(&cx)?;
        let overlay = Element::div()
            .id(&self.ids.overlay)
            .aria("hidden", "true")
            .child(rendered.element);
        Ok((overlay, rendered.close_buttons))
    }

    fn perform(&mut self, doc: &mut Document, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::CaptureFocus => {
                    self.memory = Some(FocusMemory::capture(doc));
                }
                Effect::Mount => {
                    let (overlay, close_buttons) = self.render()?;
                    doc.mount(&self.config.portal_container, overlay)?;
                    self.attach_close_buttons(doc, close_buttons);
                }
                Effect::LockScroll => {
                    if self.scroll_lock.is_none() {
                        self.scroll_lock = Some(doc.lock_scroll());
                    }
                }
                Effect::AttachListeners => self.attach(doc),
                Effect::PlaceInitialFocus => {
                    self.trap.place_initial_focus(doc);
                }
                Effect::Show => doc.set_attr(&self.ids.content, "data-state", "open")?,
                Effect::Hide => doc.set_attr(&self.ids.content, "data-state", "closed")?,
                Effect::DetachListeners => self.detach(doc),
                Effect::Unmount => {
                    if doc.exists(&self.ids.overlay) {
                        doc.unmount(&self.ids.overlay)?;
                    }
                }
                Effect::UnlockScroll => {
                    if let Some(token) = self.scroll_lock.take() {
                        doc.unlock_scroll(token);
                    }
                }
                Effect::RestoreFocus => {
                    if let Some(memory) = self.memory.take() {
                        memory.restore(doc);
                    }
                }
                Effect::RequestFrame | Effect::ScheduleUnmount | Effect::CancelPending => {
                    log::warn!("[modal] scheduling effect {:?} leaked from lifecycle", effect);
                }
            }
        }
        Ok(())
    }

    fn attach(&mut self, doc: &mut Document) {
        self.trap.activate(doc, self.owner);
        let listeners = &mut doc.listeners;
        self.listeners.escape =
            Some(listeners.add(ListenerTarget::Document, ListenerKind::KeyDown, self.owner));
        self.listeners.overlay_click = Some(listeners.add(
            ListenerTarget::Element(self.ids.overlay.clone()),
            ListenerKind::Click,
            self.owner,
        ));
        self.listeners.content_click = Some(listeners.add(
            ListenerTarget::Element(self.ids.content.clone()),
            ListenerKind::Click,
            self.owner,
        ));
    }

    fn attach_close_buttons(&mut self, doc: &mut Document, ids: Vec<String>) {
        for id in ids {
            let listener = doc.listeners.add(
                ListenerTarget::Element(id),
                ListenerKind::Click,
                self.owner,
            );
            self.listeners.close_buttons.push(listener);
        }
    }

    fn detach(&mut self, doc: &mut Document) {
        self.trap.deactivate(doc);
        let ModalListeners {
            escape,
            overlay_click,
            content_click,
            close_buttons,
        } = std::mem::take(&mut self.listeners);
        for id in [escape, overlay_click, content_click].into_iter().flatten() {
            doc.listeners.remove(id);
        }
        for id in close_buttons {
            doc.listeners.remove(id);
        }
    }

    fn teardown(&mut self, doc: &mut Document) -> Result<()> {
        let rendered = self.lifecycle.phase() != Phase::Closed;
        self.lifecycle.reset(doc);
        self.is_open = false;
        if rendered {
            self.perform(
                doc,
                vec![
                    Effect::DetachListeners,
                    Effect::Unmount,
                    Effect::UnlockScroll,
                    Effect::RestoreFocus,
                ],
            )?;
        }
        doc.listeners.remove_owner(self.owner);
        doc.scheduler.cancel_owner(self.owner);
        Ok(())
    }

    fn request_close(&self, cx: &mut EventContext) {
        if let Some(on_close) = self.on_close.clone() {
            cx.defer(move || on_close());
        }
    }
}

impl Component for ModalInner {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    fn handle_event(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        let Some(listener) = cx.listener() else {
            return Ok(());
        };

        if self.trap.listener() == Some(listener) {
            if let Some((key, modifiers)) = cx.key() {
                if self.trap.handle_key(doc, key, modifiers).prevents_default() {
                    cx.prevent_default();
                }
            }
        } else if self.listeners.escape == Some(listener) {
            if matches!(cx.key(), Some((Key::Escape, _))) && self.is_open {
                log::debug!("[modal] escape requested close");
                self.request_close(cx);
            }
        } else if self.listeners.overlay_click == Some(listener) {
            if self.config.close_on_overlay_click && self.is_open {
                log::debug!("[modal] overlay click requested close");
                self.request_close(cx);
            }
        } else if self.listeners.content_click == Some(listener) {
            // Clicks on the surface never reach the overlay
            cx.stop_propagation();
        } else if self.listeners.close_buttons.contains(&listener) && self.is_open {
            log::debug!("[modal] close button requested close");
            self.request_close(cx);
        }
        Ok(())
    }

    fn handle_task(&mut self, doc: &mut Document, task: FiredTask) -> Result<()> {
        let effects = self.lifecycle.on_task(doc, self.owner, task);
        self.perform(doc, effects)
    }
}
