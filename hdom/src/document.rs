//! The document: element tree plus the host services components rely on.

use crate::element::{collect_ids, find_element, find_element_mut, find_path, remove_element, Element, Tag};
use crate::error::DomError;
use crate::focus::{accepts_focus, collect_focusable, FocusState};
use crate::listeners::Listeners;
use crate::scheduler::Scheduler;
use crate::scroll::{content_height, extent_within, ScrollState};
use crate::scroll_lock::{ScrollLock, ScrollLockToken};
use crate::types::Overflow;

/// ID of the body element every document starts with.
pub const BODY_ID: &str = "body";

/// A headless document.
///
/// Owns the element tree, the active element, event listeners, scroll
/// offsets, the body scroll lock and the frame/timer scheduler.
#[derive(Debug)]
pub struct Document {
    body: Element,
    focus: FocusState,
    scroll: ScrollState,
    scroll_lock: ScrollLock,
    pub listeners: Listeners,
    pub scheduler: Scheduler,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Element::new(Tag::Body).id(BODY_ID),
            focus: FocusState::new(),
            scroll: ScrollState::new(),
            scroll_lock: ScrollLock::new(),
            listeners: Listeners::new(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.body, id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Append `element` as the last child of `parent_id`.
    pub fn mount(&mut self, parent_id: &str, element: Element) -> Result<(), DomError> {
        self.check_unique(&element, None)?;
        let parent = find_element_mut(&mut self.body, parent_id)
            .ok_or_else(|| DomError::NoSuchElement(parent_id.to_string()))?;
        log::debug!("[document] mount {} into {}", element.id, parent_id);
        parent.push_child(element);
        Ok(())
    }

    /// Remove the element and its subtree.
    ///
    /// Focus inside the removed subtree is lost, and listeners and scroll
    /// offsets of removed elements are dropped.
    pub fn unmount(&mut self, id: &str) -> Result<Element, DomError> {
        if id == BODY_ID {
            return Err(DomError::RootRemoval);
        }
        let removed = remove_element(&mut self.body, id)
            .ok_or_else(|| DomError::NoSuchElement(id.to_string()))?;
        log::debug!("[document] unmount {}", id);
        self.after_removal();
        Ok(removed)
    }

    /// Swap the element with the given ID for a freshly rendered one, keeping
    /// its position among its siblings.
    pub fn replace(&mut self, id: &str, element: Element) -> Result<(), DomError> {
        if id == BODY_ID {
            return Err(DomError::RootRemoval);
        }
        self.check_unique(&element, Some(id))?;
        let slot = find_element_mut(&mut self.body, id)
            .ok_or_else(|| DomError::NoSuchElement(id.to_string()))?;
        *slot = element;
        self.after_removal();
        Ok(())
    }

    /// Fails if any ID in `element` is already mounted outside `replacing`.
    fn check_unique(&self, element: &Element, replacing: Option<&str>) -> Result<(), DomError> {
        let mut incoming = Vec::new();
        collect_ids(element, &mut incoming);

        let mut existing = Vec::new();
        collect_ids(&self.body, &mut existing);
        if let Some(old) = replacing.and_then(|id| self.find(id)) {
            let mut outgoing = Vec::new();
            collect_ids(old, &mut outgoing);
            existing.retain(|id| !outgoing.contains(id));
        }

        for (i, id) in incoming.iter().enumerate() {
            if existing.contains(id) || incoming[..i].contains(id) {
                return Err(DomError::DuplicateId(id.clone()));
            }
        }
        Ok(())
    }

    fn after_removal(&mut self) {
        let body = &self.body;
        if let Some(focused) = self.focus.focused() {
            if find_element(body, focused).is_none() {
                log::debug!("[document] focused element {} removed, blurring", focused);
                self.focus.blur();
            }
        }
        self.listeners.retain_elements(|id| find_element(body, id).is_some());
        self.scroll.retain(|id| find_element(body, id).is_some());
    }

    /// True if `id` is `ancestor_id` or lies beneath it.
    pub fn contains(&self, ancestor_id: &str, id: &str) -> bool {
        self.find(ancestor_id)
            .is_some_and(|ancestor| find_element(ancestor, id).is_some())
    }

    /// IDs from the element up to the body, target first.
    /// Empty if the element is not mounted.
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut path = find_path(&self.body, id).unwrap_or_default();
        path.reverse();
        path
    }

    pub fn set_attr(&mut self, id: &str, name: &str, value: impl Into<String>) -> Result<(), DomError> {
        let element = find_element_mut(&mut self.body, id)
            .ok_or_else(|| DomError::NoSuchElement(id.to_string()))?;
        element.attrs.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn remove_attr(&mut self, id: &str, name: &str) -> Result<Option<String>, DomError> {
        let element = find_element_mut(&mut self.body, id)
            .ok_or_else(|| DomError::NoSuchElement(id.to_string()))?;
        Ok(element.attrs.remove(name))
    }

    pub fn attr(&self, id: &str, name: &str) -> Option<&str> {
        self.find(id).and_then(|el| el.get_attr(name))
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn active_element(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Programmatically focus an element.
    /// Returns true if the element is focused afterwards.
    pub fn focus(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(element) if accepts_focus(element) => {
                if self.focus.focus(id) {
                    log::debug!("[focus] -> {}", id);
                }
                true
            }
            Some(_) => {
                log::warn!("[focus] {} cannot take focus", id);
                false
            }
            None => {
                log::warn!("[focus] {} is not mounted", id);
                false
            }
        }
    }

    pub fn blur(&mut self) -> bool {
        self.focus.blur()
    }

    /// Native Tab order: next tabbable element in the document, wrapping.
    pub fn focus_next(&mut self) -> Option<String> {
        let order = collect_focusable(&self.body);
        self.focus.focus_next(&order)
    }

    /// Native Shift+Tab order: previous tabbable element, wrapping.
    pub fn focus_prev(&mut self) -> Option<String> {
        let order = collect_focusable(&self.body);
        self.focus.focus_prev(&order)
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    pub fn scroll_top(&self, id: &str) -> u16 {
        self.scroll.get(id)
    }

    pub fn scroll_to_top(&mut self, id: &str) -> Result<(), DomError> {
        if !self.exists(id) {
            return Err(DomError::NoSuchElement(id.to_string()));
        }
        self.scroll.set(id, 0);
        Ok(())
    }

    /// Scroll `container_id` so that `target_id` is inside its viewport.
    /// Containers without a `max_height` never scroll.
    pub fn scroll_into_view(&mut self, container_id: &str, target_id: &str) -> Result<u16, DomError> {
        let container = self
            .find(container_id)
            .ok_or_else(|| DomError::NoSuchElement(container_id.to_string()))?;
        let (top, height) = extent_within(container, target_id)
            .ok_or_else(|| DomError::NoSuchElement(target_id.to_string()))?;

        let Some(viewport) = container.max_height else {
            return Ok(0);
        };
        let content = content_height(container);
        Ok(self.scroll.reveal(container_id, top, height, viewport, content))
    }

    // -------------------------------------------------------------------------
    // Body scroll lock
    // -------------------------------------------------------------------------

    pub fn body_overflow(&self) -> Overflow {
        self.scroll_lock.overflow()
    }

    pub fn set_body_overflow(&mut self, overflow: Overflow) {
        self.scroll_lock.set_overflow(overflow);
    }

    pub fn lock_scroll(&mut self) -> ScrollLockToken {
        self.scroll_lock.acquire()
    }

    pub fn unlock_scroll(&mut self, token: ScrollLockToken) -> bool {
        self.scroll_lock.release(token)
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    pub fn scroll_lock_holders(&self) -> usize {
        self.scroll_lock.holders()
    }
}
