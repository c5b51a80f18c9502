//! Event handling for the select.

use hdom::{accepts_focus, Document, Key};

use crate::error::Result;
use crate::runtime::{Component, EventContext};

use super::SelectInner;

impl SelectInner {
    fn option_at(&self, doc: &Document, target: &str) -> Option<usize> {
        if !doc.contains(&self.ids.listbox, target) {
            return None;
        }
        doc.ancestors(target)
            .iter()
            .find_map(|id| self.ids.option_index(id))
    }

    fn commit_deferred(&mut self, doc: &mut Document, cx: &mut EventContext, index: usize) -> Result<()> {
        if let Some((Some(callback), value)) = self.commit(doc, index)? {
            cx.defer(move || callback(Some(value)));
        }
        Ok(())
    }

    /// Delegated clicks on the trigger and the options.
    fn on_click(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        let Some(target) = cx.target().map(str::to_string) else {
            return Ok(());
        };

        if doc.contains(&self.ids.trigger, &target) {
            return self.toggle(doc);
        }
        if let Some(index) = self.option_at(doc, &target) {
            self.commit_deferred(doc, cx, index)?;
        }
        Ok(())
    }

    fn on_key(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        let Some((key, modifiers)) = cx.key() else {
            return Ok(());
        };
        if modifiers.ctrl || modifiers.alt {
            return Ok(());
        }

        let open = self.state.is_open();
        match key {
            Key::Down | Key::Up => {
                cx.prevent_default();
                if open {
                    self.highlight(doc, key == Key::Down)?;
                } else {
                    self.open(doc)?;
                }
            }
            Key::Enter => {
                // Keep the button from synthesizing a toggling click
                cx.prevent_default();
                if !open {
                    self.open(doc)?;
                } else if self.state.commit_target().is_some() {
                    let index = self.state.highlighted_index();
                    self.commit_deferred(doc, cx, index)?;
                }
            }
            Key::Escape if open => {
                cx.prevent_default();
                cx.stop_propagation();
                self.dismiss(doc)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn on_pointer_down(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        if !self.state.is_open() {
            return Ok(());
        }
        let target = cx.target().map(str::to_string);

        // Picking an option must not pull focus off the trigger
        if target
            .as_deref()
            .is_some_and(|t| doc.contains(&self.ids.listbox, t))
        {
            cx.prevent_default();
            return Ok(());
        }

        if self.outside.notify(doc, cx) {
            log::debug!("[select] {} outside pointer-down", self.ids.root);
            self.dismiss(doc)?;

            // Focus moves on only if the pointer landed on something focusable
            let lands_on_focusable = target.is_some_and(|t| {
                doc.ancestors(&t)
                    .iter()
                    .any(|id| doc.find(id).is_some_and(accepts_focus))
            });
            if !lands_on_focusable {
                cx.prevent_default();
            }
        }
        Ok(())
    }
}

impl Component for SelectInner {
    fn owner(&self) -> hdom::OwnerId {
        self.owner
    }

    fn handle_event(&mut self, doc: &mut Document, cx: &mut EventContext) -> Result<()> {
        let Some(listener) = cx.listener() else {
            return Ok(());
        };
        if self.is_disabled() {
            return Ok(());
        }

        if self.listeners.click == Some(listener) {
            self.on_click(doc, cx)
        } else if self.listeners.key == Some(listener) {
            self.on_key(doc, cx)
        } else if self.outside.listener() == Some(listener) {
            self.on_pointer_down(doc, cx)
        } else {
            Ok(())
        }
    }
}
