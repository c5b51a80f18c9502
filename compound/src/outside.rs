//! Detects pointer-downs that land outside a container.

use std::rc::Rc;

use hdom::{Document, ListenerId, ListenerKind, ListenerTarget, OwnerId};

use crate::runtime::EventContext;

type Callback = Rc<dyn Fn()>;

/// Watches document pointer-downs on behalf of a component.
///
/// The listener is registered under the owning component, so the runtime
/// routes its pointer-downs to that component's `handle_event`. The
/// component hands them to [`OutsideWatcher::notify`], which runs the
/// callback for pointer-downs outside the container and reports whether
/// one was outside. Owners that must mutate their own state in response
/// act on that return value instead of a callback.
///
/// The watcher never fires while its container is not mounted, so a
/// component can keep it attached across re-renders.
#[derive(Default)]
pub struct OutsideWatcher {
    container: Option<String>,
    listener: Option<ListenerId>,
    callback: Option<Callback>,
}

impl std::fmt::Debug for OutsideWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideWatcher")
            .field("container", &self.container)
            .field("listener", &self.listener)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl OutsideWatcher {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    /// Invoke `callback` for every pointer-down outside the container.
    pub fn on_outside(mut self, callback: impl Fn() + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub fn set_container(&mut self, container: Option<String>) {
        self.container = container;
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Register the document pointer-down listener. Idempotent.
    pub fn attach(&mut self, doc: &mut Document, owner: OwnerId) {
        if self.listener.is_none() {
            self.listener = Some(doc.listeners.add(
                ListenerTarget::Document,
                ListenerKind::PointerDown,
                owner,
            ));
        }
    }

    pub fn detach(&mut self, doc: &mut Document) {
        if let Some(id) = self.listener.take() {
            doc.listeners.remove(id);
        }
    }

    /// Whether a pointer-down at `target` lies outside the container.
    ///
    /// A pointer-down that hit nothing counts as outside. Without a mounted
    /// container nothing is outside.
    pub fn is_outside(&self, doc: &Document, target: Option<&str>) -> bool {
        let Some(container) = self.container.as_deref().filter(|id| doc.exists(id)) else {
            return false;
        };
        match target {
            Some(id) => !doc.contains(container, id),
            None => true,
        }
    }

    /// Handle a pointer-down delivered through this watcher's listener.
    ///
    /// Returns whether it landed outside. The callback, if any, is deferred
    /// until the owning component is released.
    pub fn notify(&self, doc: &Document, cx: &mut EventContext) -> bool {
        if self.listener.is_none() || cx.listener() != self.listener {
            return false;
        }
        if !self.is_outside(doc, cx.target()) {
            return false;
        }
        if let Some(callback) = self.callback.clone() {
            cx.defer(move || callback());
        }
        true
    }
}
