//! Render scopes shared by a root with its sub-parts.
//!
//! A root renders its parts with a [`RenderContext`] that carries its scope.
//! Parts look the scope up and fail with [`Error::MissingContext`] when they
//! are rendered without it.

use crate::error::{Error, Result};
use crate::modal::ModalScope;
use crate::select::SelectScope;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    modal: Option<&'a ModalScope>,
    select: Option<&'a SelectScope<'a>>,
}

impl<'a> RenderContext<'a> {
    /// An empty context, as seen by a part rendered on its own.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modal(mut self, scope: &'a ModalScope) -> Self {
        self.modal = Some(scope);
        self
    }

    pub fn with_select(mut self, scope: &'a SelectScope<'a>) -> Self {
        self.select = Some(scope);
        self
    }

    /// The enclosing modal's scope, for the part named `part`.
    pub fn modal(&self, part: &'static str) -> Result<&'a ModalScope> {
        self.modal.ok_or(Error::MissingContext {
            part,
            root: "Modal",
        })
    }

    /// The enclosing select's scope, for the part named `part`.
    pub fn select(&self, part: &'static str) -> Result<&'a SelectScope<'a>> {
        self.select.ok_or(Error::MissingContext {
            part,
            root: "Select",
        })
    }
}
