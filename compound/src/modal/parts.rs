//! Declared sub-parts of a modal.
//!
//! Parts hold only what the caller supplies. Ids, labels and visibility come
//! from the enclosing [`ModalScope`](super::ModalScope) at render time.

use hdom::Element;

use crate::config::TRANSITION_DESCRIPTOR;
use crate::context::RenderContext;
use crate::error::Result;

/// Title region. Its id labels the dialog.
#[derive(Debug, Clone, Default)]
pub struct ModalHeader {
    title: String,
    children: Vec<Element>,
}

impl ModalHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.modal("Modal.Header")?;
        Ok(Element::header()
            .id(&scope.ids().title)
            .child(
                Element::heading(2)
                    .id(format!("{}-heading", scope.ids().title))
                    .text_content(&self.title),
            )
            .children(self.children.iter().cloned()))
    }
}

/// Main region. Its id describes the dialog.
#[derive(Debug, Clone, Default)]
pub struct ModalBody {
    children: Vec<Element>,
}

impl ModalBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// A body holding a single run of text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().child(Element::text(text))
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.modal("Modal.Body")?;
        Ok(Element::div()
            .id(&scope.ids().description)
            .children(self.children.iter().cloned()))
    }
}

/// Action region, usually holding buttons.
#[derive(Debug, Clone, Default)]
pub struct ModalFooter {
    children: Vec<Element>,
}

impl ModalFooter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<Element> {
        let scope = cx.modal("Modal.Footer")?;
        Ok(Element::footer()
            .id(format!("{}-footer", scope.ids().content))
            .children(self.children.iter().cloned()))
    }
}

/// Button that asks the host to close the dialog.
///
/// Always carries an accessible label. Without children it shows a
/// decorative icon.
#[derive(Debug, Clone, Default)]
pub struct ModalCloseButton {
    id: Option<String>,
    label: Option<String>,
    children: Vec<Element>,
}

impl ModalCloseButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the modal's close label for this button.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Render as the `index`-th close button of the dialog.
    pub fn render(&self, cx: &RenderContext<'_>, index: usize) -> Result<Element> {
        let scope = cx.modal("Modal.CloseButton")?;
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| scope.ids().close_button(index));
        let label = self.label.as_deref().unwrap_or(scope.close_label());

        let button = Element::button().id(&id).aria("label", label);
        if self.children.is_empty() {
            Ok(button.child(Element::svg().id(format!("{id}-icon")).aria("hidden", "true")))
        } else {
            Ok(button.children(self.children.iter().cloned()))
        }
    }
}

/// One declared child of [`ModalContent`].
#[derive(Debug, Clone)]
pub enum ModalPart {
    Header(ModalHeader),
    Body(ModalBody),
    Footer(ModalFooter),
    CloseButton(ModalCloseButton),
    /// Arbitrary caller content.
    Element(Element),
}

impl From<ModalHeader> for ModalPart {
    fn from(part: ModalHeader) -> Self {
        ModalPart::Header(part)
    }
}

impl From<ModalBody> for ModalPart {
    fn from(part: ModalBody) -> Self {
        ModalPart::Body(part)
    }
}

impl From<ModalFooter> for ModalPart {
    fn from(part: ModalFooter) -> Self {
        ModalPart::Footer(part)
    }
}

impl From<ModalCloseButton> for ModalPart {
    fn from(part: ModalCloseButton) -> Self {
        ModalPart::CloseButton(part)
    }
}

impl From<Element> for ModalPart {
    fn from(element: Element) -> Self {
        ModalPart::Element(element)
    }
}

/// The dialog surface and its declared children, in order.
#[derive(Debug, Clone, Default)]
pub struct ModalContent {
    parts: Vec<ModalPart>,
}

/// A rendered dialog surface.
#[derive(Debug, Clone)]
pub struct RenderedContent {
    pub element: Element,
    /// Ids of the rendered close buttons, in order.
    pub close_buttons: Vec<String>,
}

impl ModalContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, part: impl Into<ModalPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn parts(&self) -> &[ModalPart] {
        &self.parts
    }

    pub fn render(&self, cx: &RenderContext<'_>) -> Result<RenderedContent> {
        let scope = cx.modal("Modal.Content")?;
        let ids = scope.ids();

        let mut close_buttons = Vec::new();
        let mut children = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let child = match part {
                ModalPart::Header(header) => header.render(cx)?,
                ModalPart::Body(body) => body.render(cx)?,
                ModalPart::Footer(footer) => footer.render(cx)?,
                ModalPart::CloseButton(button) => {
                    let element = button.render(cx, close_buttons.len())?;
                    close_buttons.push(element.id.clone());
                    element
                }
                ModalPart::Element(element) => element.clone(),
            };
            children.push(child);
        }

        let element = Element::div()
            .id(&ids.content)
            .role("dialog")
            .aria("modal", "true")
            .aria("labelledby", &ids.title)
            .aria("describedby", &ids.description)
            .tab_index(-1)
            .attr("data-state", if scope.visible() { "open" } else { "closed" })
            .attr("data-transition", TRANSITION_DESCRIPTOR)
            .children(children);

        Ok(RenderedContent {
            element,
            close_buttons,
        })
    }
}
