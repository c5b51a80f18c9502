//! Component configuration.

use std::time::Duration;

use hdom::BODY_ID;

pub use hdom::FRAME_INTERVAL;

/// Length of the dialog fade transition. The close timer uses the same
/// value, so the dialog is unmounted exactly when the fade ends.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(200);

/// Transition metadata attached to the dialog surface.
pub const TRANSITION_DESCRIPTOR: &str = "opacity 200ms ease-out";

/// Default accessible label of the modal close button.
pub const DEFAULT_CLOSE_LABEL: &str = "Close";

/// Default listbox viewport height, in option rows.
pub const DEFAULT_LIST_MAX_HEIGHT: u16 = 6;

/// Modal root configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    /// Whether clicking the overlay invokes `on_close`.
    pub close_on_overlay_click: bool,

    /// Element the dialog is portaled into.
    pub portal_container: String,

    /// Accessible label for close buttons that do not set their own.
    pub close_label: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_overlay_click: true,
            portal_container: BODY_ID.to_string(),
            close_label: DEFAULT_CLOSE_LABEL.to_string(),
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_overlay_click(mut self, close: bool) -> Self {
        self.close_on_overlay_click = close;
        self
    }

    /// Mount the dialog under this element instead of the body.
    pub fn portal_container(mut self, id: impl Into<String>) -> Self {
        self.portal_container = id.into();
        self
    }

    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = label.into();
        self
    }
}

/// Interactivity of a select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Default,
    /// Neither pointer nor keyboard can open the dropdown.
    Disabled,
}

/// Select root configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    pub variant: Variant,

    /// Listbox viewport height in rows.
    pub list_max_height: u16,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Default,
            list_max_height: DEFAULT_LIST_MAX_HEIGHT,
        }
    }
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Shorthand for `variant(Variant::Disabled)`.
    pub fn disabled(self) -> Self {
        self.variant(Variant::Disabled)
    }

    pub fn list_max_height(mut self, rows: u16) -> Self {
        self.list_max_height = rows;
        self
    }
}
