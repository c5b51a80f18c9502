//! Combobox-style select: a labelled trigger and a listbox popup.
//!
//! The value is controlled. Committing an option reports it through
//! `on_change`; the host feeds the new value back with [`Select::set_value`].

mod events;
mod parts;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

use hdom::{generate_id, Document, Element, ListenerId, ListenerKind, ListenerTarget, OwnerId};

use crate::config::{SelectConfig, Variant};
use crate::context::RenderContext;
use crate::error::Result;
use crate::outside::OutsideWatcher;
use crate::runtime::Runtime;

pub use parts::{SelectGroup, SelectItem, SelectLabel, SelectList, SelectOption, SelectTrigger};
pub use state::{OptionRecord, SelectState};

type ChangeCallback = Rc<dyn Fn(Option<String>)>;

/// Element ids of one select instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectIds {
    /// Container of label, trigger and listbox.
    pub root: String,
    pub label: String,
    pub trigger: String,
    pub listbox: String,
}

impl SelectIds {
    fn new(base: String) -> Self {
        Self {
            label: format!("{base}-label"),
            trigger: format!("{base}-trigger"),
            listbox: format!("{base}-listbox"),
            root: base,
        }
    }

    pub fn option(&self, index: usize) -> String {
        format!("{}-option-{}", self.listbox, index)
    }

    /// Caption of the `index`-th group.
    pub fn group(&self, index: usize) -> String {
        format!("{}-group-{}", self.listbox, index)
    }

    /// Option index encoded in an option id.
    pub fn option_index(&self, id: &str) -> Option<usize> {
        id.strip_prefix(&self.listbox)?
            .strip_prefix("-option-")?
            .parse()
            .ok()
    }
}

/// What select parts can see while rendering.
#[derive(Debug, Clone, Copy)]
pub struct SelectScope<'a> {
    ids: &'a SelectIds,
    state: &'a SelectState,
    variant: Variant,
    list_max_height: u16,
}

impl<'a> SelectScope<'a> {
    pub fn new(ids: &'a SelectIds, state: &'a SelectState, config: &SelectConfig) -> Self {
        Self {
            ids,
            state,
            variant: config.variant,
            list_max_height: config.list_max_height,
        }
    }

    pub fn ids(&self) -> &'a SelectIds {
        self.ids
    }

    pub fn state(&self) -> &'a SelectState {
        self.state
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn list_max_height(&self) -> u16 {
        self.list_max_height
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Default)]
pub struct SelectBuilder {
    config: SelectConfig,
    value: Option<String>,
    on_change: Option<ChangeCallback>,
    label: Option<SelectLabel>,
    trigger: SelectTrigger,
    list: SelectList,
}

impl SelectBuilder {
    pub fn config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn on_change(mut self, callback: impl Fn(Option<String>) + 'static) -> Self {
        self.on_change = Some(Rc::new(callback));
        self
    }

    pub fn label(mut self, label: SelectLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn trigger(mut self, trigger: SelectTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn list(mut self, list: SelectList) -> Self {
        self.list = list;
        self
    }

    /// Render the select under `parent_id` and register it.
    ///
    /// Fails with [`Error::DuplicateOption`](crate::Error::DuplicateOption)
    /// before touching the document if two options share a value.
    pub fn mount(self, runtime: &mut Runtime, parent_id: &str) -> Result<Select> {
        let state = SelectState::new(self.list.records(), self.value)?;
        let ids = SelectIds::new(generate_id("select"));
        let mut inner = SelectInner {
            owner: OwnerId::next(),
            outside: OutsideWatcher::new(&ids.root),
            ids,
            config: self.config,
            state,
            label: self.label,
            trigger: self.trigger,
            list: self.list,
            on_change: self.on_change,
            listeners: SelectListeners::default(),
        };

        let doc = runtime.document_mut();
        doc.mount(parent_id, inner.render()?)?;
        inner.attach(doc);
        log::debug!("[select] mounted {} with {} options", inner.ids.root, inner.state.options().len());

        let select = Select {
            inner: Rc::new(RefCell::new(inner)),
        };
        runtime.register(select.inner.clone());
        Ok(select)
    }
}

// =============================================================================
// Select
// =============================================================================

/// Handle to a mounted select. Cheap to clone.
#[derive(Clone)]
pub struct Select {
    inner: Rc<RefCell<SelectInner>>,
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Select")
            .field("ids", &inner.ids)
            .field("state", &inner.state)
            .field("variant", &inner.config.variant)
            .finish()
    }
}

impl Select {
    pub fn builder() -> SelectBuilder {
        SelectBuilder::default()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().state.is_open()
    }

    pub fn highlighted_index(&self) -> usize {
        self.inner.borrow().state.highlighted_index()
    }

    pub fn value(&self) -> Option<String> {
        self.inner.borrow().state.value().map(str::to_string)
    }

    pub fn options(&self) -> Vec<OptionRecord> {
        self.inner.borrow().state.options().to_vec()
    }

    pub fn variant(&self) -> Variant {
        self.inner.borrow().config.variant
    }

    pub fn ids(&self) -> SelectIds {
        self.inner.borrow().ids.clone()
    }

    pub fn owner(&self) -> OwnerId {
        self.inner.borrow().owner
    }

    /// Open the dropdown. No-op when disabled.
    pub fn open(&self, runtime: &mut Runtime) -> Result<()> {
        self.inner.borrow_mut().open(runtime.document_mut())
    }

    /// Close the dropdown and focus the trigger.
    pub fn close(&self, runtime: &mut Runtime) -> Result<()> {
        self.inner.borrow_mut().dismiss(runtime.document_mut())
    }

    pub fn toggle(&self, runtime: &mut Runtime) -> Result<()> {
        self.inner.borrow_mut().toggle(runtime.document_mut())
    }

    pub fn focus(&self, runtime: &mut Runtime) -> bool {
        let trigger = self.inner.borrow().ids.trigger.clone();
        runtime.document_mut().focus(&trigger)
    }

    /// Blur the trigger if it has focus.
    pub fn blur(&self, runtime: &mut Runtime) -> bool {
        let trigger = self.inner.borrow().ids.trigger.clone();
        let doc = runtime.document_mut();
        let focused = doc.active_element() == Some(trigger.as_str());
        focused && doc.blur()
    }

    /// Commit `value` as if it had been picked from the list.
    ///
    /// Unknown or disabled values, and a disabled select, are no-ops.
    /// Returns whether `on_change` was invoked.
    pub fn select_value(&self, runtime: &mut Runtime, value: &str) -> Result<bool> {
        let committed = {
            let mut inner = self.inner.borrow_mut();
            if inner.is_disabled() {
                return Ok(false);
            }
            match inner.state.index_of(value) {
                Some(index) => inner.commit(runtime.document_mut(), index)?,
                None => None,
            }
        };

        match committed {
            Some((callback, value)) => {
                if let Some(callback) = callback {
                    callback(Some(value));
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Feed the controlled value back in.
    pub fn set_value(&self, runtime: &mut Runtime, value: Option<String>) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.state.set_value(value);
        inner.refresh(runtime.document_mut())
    }

    /// Switch the variant. Disabling closes an open dropdown.
    pub fn set_variant(&self, runtime: &mut Runtime, variant: Variant) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.config.variant = variant;
        if variant == Variant::Disabled {
            inner.state.close();
        }
        inner.refresh(runtime.document_mut())
    }

    /// Remove the select from the document and unregister it.
    pub fn destroy(&self, runtime: &mut Runtime) -> Result<()> {
        let (owner, root) = {
            let mut inner = self.inner.borrow_mut();
            let doc = runtime.document_mut();
            inner.detach(doc);
            inner.state.close();
            (inner.owner, inner.ids.root.clone())
        };
        let doc = runtime.document_mut();
        if doc.exists(&root) {
            doc.unmount(&root)?;
        }
        doc.listeners.remove_owner(owner);
        runtime.unregister(owner);
        Ok(())
    }
}

// =============================================================================
// Inner
// =============================================================================

#[derive(Debug, Default)]
struct SelectListeners {
    click: Option<ListenerId>,
    key: Option<ListenerId>,
}

pub(crate) struct SelectInner {
    owner: OwnerId,
    ids: SelectIds,
    config: SelectConfig,
    state: SelectState,
    label: Option<SelectLabel>,
    trigger: SelectTrigger,
    list: SelectList,
    on_change: Option<ChangeCallback>,
    outside: OutsideWatcher,
    listeners: SelectListeners,
}

impl SelectInner {
    fn is_disabled(&self) -> bool {
        self.config.variant == Variant::Disabled
    }

    fn render(&self) -> Result<Element> {
        let scope = SelectScope::new(&self.ids, &self.state, &self.config);
        let cx = RenderContext::new().with_select(&scope);

        let mut root = Element::div().id(&self.ids.root);
        if let Some(label) = &self.label {
            root = root.child(label.render(&cx)?);
        }
        root = root.child(self.trigger.render(&cx)?);
        if let Some(list) = self.list.render(&cx)? {
            root = root.child(list);
        }
        Ok(root)
    }

    fn attach(&mut self, doc: &mut Document) {
        self.listeners.click = Some(doc.listeners.add(
            ListenerTarget::Element(self.ids.root.clone()),
            ListenerKind::Click,
            self.owner,
        ));
        self.listeners.key = Some(doc.listeners.add(
            ListenerTarget::Element(self.ids.trigger.clone()),
            ListenerKind::KeyDown,
            self.owner,
        ));
        self.outside.attach(doc, self.owner);
    }

    fn detach(&mut self, doc: &mut Document) {
        let SelectListeners { click, key } = std::mem::take(&mut self.listeners);
        for id in [click, key].into_iter().flatten() {
            doc.listeners.remove(id);
        }
        self.outside.detach(doc);
    }

    /// Re-render in place and keep the highlighted option in view.
    fn refresh(&mut self, doc: &mut Document) -> Result<()> {
        doc.replace(&self.ids.root, self.render()?)?;
        if self.state.is_open() {
            self.reveal_highlighted(doc)?;
        }
        Ok(())
    }

    fn reveal_highlighted(&self, doc: &mut Document) -> Result<()> {
        if self.state.highlighted().is_none() {
            return Ok(());
        }
        let index = self.state.highlighted_index();
        // The first option also reveals any group caption above it
        if Some(index) == self.state.first_enabled() {
            doc.scroll_to_top(&self.ids.listbox)?;
        } else {
            doc.scroll_into_view(&self.ids.listbox, &self.ids.option(index))?;
        }
        Ok(())
    }

    fn open(&mut self, doc: &mut Document) -> Result<()> {
        if self.is_disabled() || !self.state.open() {
            return Ok(());
        }
        log::debug!(
            "[select] {} open, highlight {}",
            self.ids.root,
            self.state.highlighted_index()
        );
        self.refresh(doc)
    }

    /// Close and return focus to the trigger.
    fn dismiss(&mut self, doc: &mut Document) -> Result<()> {
        if self.state.close() {
            log::debug!("[select] {} closed", self.ids.root);
            self.refresh(doc)?;
        }
        if !self.is_disabled() {
            doc.focus(&self.ids.trigger);
        }
        Ok(())
    }

    fn toggle(&mut self, doc: &mut Document) -> Result<()> {
        if self.is_disabled() {
            Ok(())
        } else if self.state.is_open() {
            self.dismiss(doc)
        } else {
            self.open(doc)
        }
    }

    fn highlight(&mut self, doc: &mut Document, forward: bool) -> Result<()> {
        let moved = if forward {
            self.state.highlight_next()
        } else {
            self.state.highlight_prev()
        };
        log::trace!("[select] {} highlight -> {:?}", self.ids.root, moved);
        self.refresh(doc)
    }

    /// Commit the option at `index` if it is enabled: close, focus the
    /// trigger and hand back the callback to invoke with the value.
    fn commit(
        &mut self,
        doc: &mut Document,
        index: usize,
    ) -> Result<Option<(Option<ChangeCallback>, String)>> {
        let Some(option) = self.state.options().get(index).filter(|o| o.is_enabled()) else {
            log::trace!("[select] {} ignored commit of option {}", self.ids.root, index);
            return Ok(None);
        };
        let value = option.value.clone();
        log::debug!("[select] {} commit {}", self.ids.root, value);
        self.dismiss(doc)?;
        Ok(Some((self.on_change.clone(), value)))
    }
}
