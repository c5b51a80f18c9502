mod content;
mod node;

pub use content::Content;
pub use node::{generate_id, Element, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Path of element IDs from `root` down to `id` (both inclusive).
pub fn find_path(root: &Element, id: &str) -> Option<Vec<String>> {
    if root.id == id {
        return Some(vec![root.id.clone()]);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(mut path) = find_path(child, id) {
                path.insert(0, root.id.clone());
                return Some(path);
            }
        }
    }

    None
}

/// Detach the element with the given ID from beneath `root`.
/// The root itself is never removed.
pub fn remove_element(root: &mut Element, id: &str) -> Option<Element> {
    let Content::Children(children) = &mut root.content else {
        return None;
    };

    if let Some(pos) = children.iter().position(|c| c.id == id) {
        return Some(children.remove(pos));
    }

    children
        .iter_mut()
        .find_map(|child| remove_element(child, id))
}

/// Collect every element ID in the subtree, including the root.
pub fn collect_ids(element: &Element, ids: &mut Vec<String>) {
    ids.push(element.id.clone());
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_ids(child, ids);
        }
    }
}
