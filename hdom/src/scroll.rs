use std::collections::HashMap;

use crate::element::{Content, Element};

/// Tracks vertical scroll offsets of scroll containers.
/// Like `FocusState`, this persists across re-renders: offsets are keyed by
/// element ID and survive a container being replaced by a fresh render.
#[derive(Debug, Default)]
pub struct ScrollState {
    offsets: HashMap<String, u16>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the scroll offset for an element.
    pub fn get(&self, id: &str) -> u16 {
        self.offsets.get(id).copied().unwrap_or_default()
    }

    /// Set the scroll offset for an element.
    pub fn set(&mut self, id: &str, y: u16) {
        self.offsets.insert(id.to_string(), y);
    }

    /// Drop offsets of elements that no longer exist.
    pub fn retain(&mut self, exists: impl Fn(&str) -> bool) {
        self.offsets.retain(|id, _| exists(id));
    }

    /// Scroll the minimum distance needed for rows `top..top + height` to be
    /// visible in a viewport of `viewport` rows, clamped to the content.
    /// Returns the new offset.
    pub fn reveal(&mut self, id: &str, top: u16, height: u16, viewport: u16, content: u16) -> u16 {
        let current = self.get(id);
        let bottom = top.saturating_add(height);

        let mut offset = current;
        if top < offset {
            offset = top;
        } else if bottom > offset.saturating_add(viewport) {
            offset = bottom.saturating_sub(viewport);
        }
        offset = offset.min(content.saturating_sub(viewport));

        if offset != current {
            log::debug!("[scroll] {} offset {} -> {}", id, current, offset);
        }
        self.set(id, offset);
        offset
    }
}

/// Vertical extent of `target` inside `container`: rows above it and its own
/// height. Only leaf elements occupy rows; a non-leaf target spans its leaves.
pub fn extent_within(container: &Element, target: &str) -> Option<(u16, u16)> {
    let mut offset = 0u16;
    let mut found = None;
    walk_extent(container, target, &mut offset, &mut found);
    found
}

/// Total rows of content inside `container`.
pub fn content_height(container: &Element) -> u16 {
    if container.is_leaf() {
        return container.height;
    }
    container
        .child_elements()
        .iter()
        .map(content_height)
        .fold(0, u16::saturating_add)
}

fn walk_extent(element: &Element, target: &str, offset: &mut u16, found: &mut Option<(u16, u16)>) {
    let start = *offset;

    match &element.content {
        Content::Children(children) if !children.is_empty() => {
            for child in children {
                walk_extent(child, target, offset, found);
            }
        }
        _ => *offset = offset.saturating_add(element.height),
    }

    if element.id == target {
        *found = Some((start, offset.saturating_sub(start)));
    }
}
