use crate::element::{Content, Element, Tag};

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next element of `order` (Tab navigation), wrapping at the end.
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, order: &[String]) -> Option<String> {
        if order.is_empty() {
            return None;
        }

        let new_focus = match self.position_in(order) {
            Some(i) => order[(i + 1) % order.len()].clone(),
            None => order[0].clone(),
        };

        self.focus(&new_focus).then_some(new_focus)
    }

    /// Focus the previous element of `order` (Shift+Tab navigation), wrapping
    /// at the start. Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, order: &[String]) -> Option<String> {
        if order.is_empty() {
            return None;
        }

        let new_focus = match self.position_in(order) {
            Some(0) | None => order[order.len() - 1].clone(),
            Some(i) => order[i - 1].clone(),
        };

        self.focus(&new_focus).then_some(new_focus)
    }

    fn position_in(&self, order: &[String]) -> Option<usize> {
        let current = self.focused.as_deref()?;
        order.iter().position(|id| id == current)
    }
}

/// Whether the element takes part in sequential (Tab) navigation.
///
/// Interactive controls and links with an `href` are tabbable, as is anything
/// with a non-negative explicit tab index. Disabled elements and elements with
/// a negative tab index never are.
pub fn is_tabbable(element: &Element) -> bool {
    if element.disabled {
        return false;
    }
    match element.tab_index {
        Some(index) => index >= 0,
        None => match element.tag {
            Tag::Button | Tag::Input | Tag::Select | Tag::Textarea => true,
            Tag::Anchor => element.get_attr("href").is_some(),
            _ => false,
        },
    }
}

/// Whether the element can hold focus at all, including programmatic focus
/// on elements with `tab_index(-1)`.
pub fn accepts_focus(element: &Element) -> bool {
    !element.disabled && (element.tab_index.is_some() || is_tabbable(element))
}

/// Collect all tabbable descendant IDs in tree order.
/// The element itself is not included.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, &mut result);
        }
    }
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if is_tabbable(element) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, result);
        }
    }
}
