use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique element ID with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element kind. Drives the focusability predicate and native default actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Span,
    Button,
    Anchor,
    Input,
    Select,
    Textarea,
    Label,
    Header,
    Footer,
    Heading(u8),
    List,
    ListItem,
    Svg,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    /// Attributes such as `role`, `aria-*`, `href` or `type`.
    pub attrs: BTreeMap<String, String>,

    // Interaction
    /// Explicit tab index. `Some(-1)` is focusable programmatically but
    /// skipped by Tab navigation.
    pub tab_index: Option<i32>,
    /// Disabled elements never receive focus.
    pub disabled: bool,

    // Geometry
    /// Rows this element occupies when it is a leaf inside a scroll container.
    pub height: u16,
    /// Viewport height in rows for scroll containers.
    pub max_height: Option<u16>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Div,
            content: Content::None,
            attrs: BTreeMap::new(),
            tab_index: None,
            disabled: false,
            height: 1,
            max_height: None,
        }
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self {
            id: generate_id("div"),
            ..Self::new(Tag::Div)
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Self::new(Tag::Span)
        }
    }

    pub fn button() -> Self {
        Self {
            id: generate_id("button"),
            ..Self::new(Tag::Button)
        }
        .attr("type", "button")
    }

    /// Create a link. Only anchors with an `href` take part in Tab order.
    pub fn anchor(href: impl Into<String>) -> Self {
        Self {
            id: generate_id("a"),
            ..Self::new(Tag::Anchor)
        }
        .attr("href", href)
    }

    pub fn input() -> Self {
        Self {
            id: generate_id("input"),
            ..Self::new(Tag::Input)
        }
    }

    pub fn list() -> Self {
        Self {
            id: generate_id("ul"),
            ..Self::new(Tag::List)
        }
    }

    pub fn list_item() -> Self {
        Self {
            id: generate_id("li"),
            ..Self::new(Tag::ListItem)
        }
    }

    pub fn label() -> Self {
        Self {
            id: generate_id("label"),
            ..Self::new(Tag::Label)
        }
    }

    pub fn header() -> Self {
        Self {
            id: generate_id("header"),
            ..Self::new(Tag::Header)
        }
    }

    pub fn footer() -> Self {
        Self {
            id: generate_id("footer"),
            ..Self::new(Tag::Footer)
        }
    }

    pub fn heading(level: u8) -> Self {
        Self {
            id: generate_id("h"),
            ..Self::new(Tag::Heading(level))
        }
    }

    pub fn svg() -> Self {
        Self {
            id: generate_id("svg"),
            ..Self::new(Tag::Svg)
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn role(self, role: impl Into<String>) -> Self {
        self.attr("role", role)
    }

    /// Set an `aria-*` attribute, e.g. `.aria("expanded", "true")`.
    pub fn aria(self, name: &str, value: impl Into<String>) -> Self {
        self.attr(format!("aria-{name}"), value)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    // Interaction
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Geometry
    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn max_height(mut self, max_height: u16) -> Self {
        self.max_height = Some(max_height);
        self
    }

    // Content
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// Concatenated text of this element and its descendants.
    pub fn inner_text(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children.iter().map(Element::inner_text).collect(),
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// True if this element has no element children.
    pub fn is_leaf(&self) -> bool {
        self.child_elements().is_empty()
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => {
                // Text content is replaced by children
                self.content = Content::Children(vec![child]);
            }
        }
    }
}
