//! Declared sub-parts of a select.
//!
//! The option list is declarative: the root flattens it into
//! [`OptionRecord`]s once, in document order, when the select is built.

use hdom::Element;

use crate::config::Variant;
use crate::context::RenderContext;
use crate::error::Result;

use super::state::OptionRecord;

/// Visible label. Its id labels the trigger and the listbox.
#[derive(Debug, Clone, Default)]
pub struct SelectLabel {
    text: String,
}

impl SelectLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.select("Select.Label")?;
        let mut label = Element::label()
            .id(&scope.ids().label)
            .text_content(&self.text);
        if scope.variant() == Variant::Disabled {
            label = label.attr("data-disabled", "true");
        }
        Ok(label)
    }
}

/// The combobox button.
#[derive(Debug, Clone, Default)]
pub struct SelectTrigger {
    placeholder: String,
}

impl SelectTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown while no option matches the value.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.select("Select.Trigger")?;
        let ids = scope.ids();
        let state = scope.state();
        let disabled = scope.variant() == Variant::Disabled;

        let text = state
            .selected()
            .map(|option| option.content.as_str())
            .unwrap_or(self.placeholder.as_str());

        let mut trigger = Element::button()
            .id(&ids.trigger)
            .role("combobox")
            .aria("haspopup", "listbox")
            .aria("expanded", state.is_open().to_string())
            .aria("controls", &ids.listbox)
            .aria("labelledby", &ids.label)
            .aria("disabled", disabled.to_string())
            .disabled(disabled)
            .text_content(text);

        if state.is_open() && state.highlighted().is_some() {
            trigger = trigger.aria("activedescendant", ids.option(state.highlighted_index()));
        }
        if state.selected().is_none() {
            trigger = trigger.attr("data-placeholder", "true");
        }
        Ok(trigger)
    }
}

/// One selectable entry.
#[derive(Debug, Clone)]
pub struct SelectOption {
    value: String,
    content: String,
    disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            content: content.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn record(&self) -> OptionRecord {
        OptionRecord {
            value: self.value.clone(),
            content: self.content.clone(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.select("Select.Option")?;
        let state = scope.state();
        let index = state.index_of(&self.value).unwrap_or_default();

        let selected = state.value() == Some(self.value.as_str());
        let highlighted = state.is_open()
            && !self.disabled
            && index == state.highlighted_index();

        let mut option = Element::list_item()
            .id(scope.ids().option(index))
            .role("option")
            .aria("selected", selected.to_string())
            .aria("disabled", self.disabled.to_string())
            .text_content(&self.content);
        if highlighted {
            option = option.attr("data-highlighted", "true");
        }
        Ok(option)
    }
}

/// Options under a visible caption.
#[derive(Debug, Clone)]
pub struct SelectGroup {
    label: String,
    options: Vec<SelectOption>,
}

impl SelectGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    /// Render as the `index`-th group of the list.
    pub fn render(&self, cx: &RenderContext<'_>, index: usize) -> Result<Element> {
        let scope = cx.select("Select.Group")?;
        let caption = scope.ids().group(index);

        let mut group = Element::list()
            .id(format!("{caption}-options"))
            .role("group")
            .aria("labelledby", &caption)
            .child(
                Element::list_item()
                    .id(&caption)
                    .role("presentation")
                    .text_content(&self.label),
            );
        for option in &self.options {
            group = group.child(option.render(cx)?);
        }

        Ok(Element::list_item()
            .id(format!("{caption}-wrapper"))
            .role("presentation")
            .child(group))
    }
}

/// A direct child of [`SelectList`].
#[derive(Debug, Clone)]
pub enum SelectItem {
    Option(SelectOption),
    Group(SelectGroup),
}

/// The listbox popup. Rendered only while open.
#[derive(Debug, Clone, Default)]
pub struct SelectList {
    items: Vec<SelectItem>,
}

impl SelectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.items.push(SelectItem::Option(option));
        self
    }

    pub fn group(mut self, group: SelectGroup) -> Self {
        self.items.push(SelectItem::Group(group));
        self
    }

    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    /// All options in document order, groups flattened.
    pub fn records(&self) -> Vec<OptionRecord> {
        let mut records = Vec::new();
        for item in &self.items {
            match item {
                SelectItem::Option(option) => records.push(option.record()),
                SelectItem::Group(group) => {
                    records.extend(group.options.iter().map(SelectOption::record));
                }
            }
        }
        records
    }

    /// `None` while the dropdown is closed.
    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Option<Element>> {
        let scope = cx.select("Select.List")?;
        if !scope.state().is_open() {
            return Ok(None);
        }

        let mut list = Element::list()
            .id(&scope.ids().listbox)
            .role("listbox")
            .aria("labelledby", &scope.ids().label)
            .max_height(scope.list_max_height());

        let mut groups = 0;
        for item in &self.items {
            let child = match item {
                SelectItem::Option(option) => option.render(cx)?,
                SelectItem::Group(group) => {
                    groups += 1;
                    group.render(cx, groups - 1)?
                }
            };
            list = list.child(child);
        }
        Ok(Some(list))
    }
}
