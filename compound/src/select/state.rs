//! Select dropdown state.

use crate::error::{Error, Result};

/// One option of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub value: String,
    /// Display text, also shown by the trigger once selected.
    pub content: String,
    pub disabled: bool,
}

impl OptionRecord {
    pub fn new(value: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            content: content.into(),
            disabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Open flag, roving highlight and controlled value over an ordered,
/// immutable option sequence.
///
/// The highlight only ever rests on an enabled option, except when no
/// option is enabled at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectState {
    is_open: bool,
    highlighted_index: usize,
    value: Option<String>,
    options: Vec<OptionRecord>,
}

impl SelectState {
    /// Fails with [`Error::DuplicateOption`] if two options share a value.
    pub fn new(options: Vec<OptionRecord>, value: Option<String>) -> Result<Self> {
        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|o| o.value == option.value) {
                return Err(Error::DuplicateOption(option.value.clone()));
            }
        }
        Ok(Self {
            is_open: false,
            highlighted_index: 0,
            value,
            options,
        })
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted_index
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn options(&self) -> &[OptionRecord] {
        &self.options
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    /// The option matching the current value.
    pub fn selected(&self) -> Option<&OptionRecord> {
        self.value
            .as_deref()
            .and_then(|value| self.index_of(value))
            .map(|i| &self.options[i])
    }

    pub fn first_enabled(&self) -> Option<usize> {
        self.options.iter().position(OptionRecord::is_enabled)
    }

    /// Open the dropdown and reset the highlight to the selected option.
    ///
    /// Without a usable selected option, the first enabled option is
    /// highlighted. Returns false if already open.
    pub fn open(&mut self) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.highlighted_index = self
            .value
            .as_deref()
            .and_then(|value| self.index_of(value))
            .filter(|&i| self.options[i].is_enabled())
            .or_else(|| self.first_enabled())
            .unwrap_or(0);
        true
    }

    /// Returns false if already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.is_open, false)
    }

    /// Move the highlight to the next enabled option, wrapping around.
    /// Returns the new index, or `None` when no option is enabled.
    pub fn highlight_next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Move the highlight to the previous enabled option, wrapping around.
    pub fn highlight_prev(&mut self) -> Option<usize> {
        self.step(self.options.len().saturating_sub(1))
    }

    fn step(&mut self, stride: usize) -> Option<usize> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        let mut index = self.highlighted_index.min(len - 1);
        for _ in 0..len {
            index = (index + stride) % len;
            if self.options[index].is_enabled() {
                self.highlighted_index = index;
                return Some(index);
            }
        }
        None
    }

    /// The highlighted option, if it is a valid target.
    pub fn highlighted(&self) -> Option<&OptionRecord> {
        self.options
            .get(self.highlighted_index)
            .filter(|o| o.is_enabled())
    }

    /// The option an Enter press would commit.
    pub fn commit_target(&self) -> Option<&OptionRecord> {
        self.is_open.then(|| self.highlighted()).flatten()
    }
}
