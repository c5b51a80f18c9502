//! Keyboard focus trapping and focus restoration.

use hdom::{
    collect_focusable, Document, Key, ListenerId, ListenerKind, ListenerTarget, Modifiers,
    OwnerId,
};

/// What the trap did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Not a Tab press.
    Ignored,
    /// Tab stays inside the container; native order applies.
    Native,
    /// Nothing inside is tabbable, so focus stays where it is.
    Held,
    /// Focus wrapped around (or was pulled back) to this element.
    Wrapped(String),
}

impl TrapOutcome {
    /// Whether the native Tab navigation must be suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(self, TrapOutcome::Held | TrapOutcome::Wrapped(_))
    }
}

/// Keeps Tab and Shift+Tab cycling inside a container.
///
/// While active, the trap owns one document-level key listener. The owning
/// component forwards key events from that listener to [`FocusTrap::handle_key`].
#[derive(Debug)]
pub struct FocusTrap {
    container: String,
    listener: Option<ListenerId>,
}

impl FocusTrap {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            listener: None,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// The trap's key listener, while active.
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Register the document key listener. Idempotent.
    pub fn activate(&mut self, doc: &mut Document, owner: OwnerId) {
        if self.listener.is_none() {
            let id = doc
                .listeners
                .add(ListenerTarget::Document, ListenerKind::KeyDown, owner);
            log::debug!("[focus_trap] active on {}", self.container);
            self.listener = Some(id);
        }
    }

    /// Remove the document key listener. Idempotent.
    pub fn deactivate(&mut self, doc: &mut Document) {
        if let Some(id) = self.listener.take() {
            doc.listeners.remove(id);
            log::debug!("[focus_trap] released {}", self.container);
        }
    }

    /// Tabbable elements inside the container, in tree order.
    pub fn focusables(&self, doc: &Document) -> Vec<String> {
        doc.find(&self.container)
            .map(collect_focusable)
            .unwrap_or_default()
    }

    /// Focus the first tabbable element, or the container itself when there
    /// is none. Returns the element that received focus.
    pub fn place_initial_focus(&self, doc: &mut Document) -> Option<String> {
        let target = self
            .focusables(doc)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.container.clone());
        doc.focus(&target).then_some(target)
    }

    /// Apply the trap to a key press and move focus when it wraps.
    pub fn handle_key(&self, doc: &mut Document, key: Key, modifiers: Modifiers) -> TrapOutcome {
        let backward = match key {
            Key::Tab => modifiers.shift,
            Key::BackTab => true,
            _ => return TrapOutcome::Ignored,
        };

        let focusables = self.focusables(doc);
        let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
            return TrapOutcome::Held;
        };

        let position = doc
            .active_element()
            .and_then(|id| focusables.iter().position(|f| f == id));

        let destination = match position {
            // Focus is outside the tab order of the container; pull it in
            None if backward => last,
            None => first,
            Some(0) if backward => last,
            Some(i) if !backward && i + 1 == focusables.len() => first,
            Some(_) => return TrapOutcome::Native,
        };

        let destination = destination.clone();
        doc.focus(&destination);
        log::trace!("[focus_trap] wrapped to {}", destination);
        TrapOutcome::Wrapped(destination)
    }
}

/// The element that was focused before a dialog opened.
///
/// Captured once per open cycle and consumed on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusMemory {
    previous: Option<String>,
}

impl FocusMemory {
    pub fn capture(doc: &Document) -> Self {
        Self {
            previous: doc.active_element().map(str::to_string),
        }
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Return focus to the remembered element. If it is gone (or nothing was
    /// focused), focus is cleared instead. Returns the restored element.
    pub fn restore(self, doc: &mut Document) -> Option<String> {
        match self.previous {
            Some(id) if doc.focus(&id) => {
                log::debug!("[focus_trap] restored focus to {}", id);
                Some(id)
            }
            _ => {
                doc.blur();
                None
            }
        }
    }
}
