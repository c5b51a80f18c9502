use crate::listeners::ListenerKind;

/// Events dispatched into a document.
///
/// Key events carry no target: they go to whichever element is active when
/// they are dispatched. Pointer events carry the element under the pointer,
/// or `None` when nothing was hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key pressed while the document has focus.
    KeyDown { key: Key, modifiers: Modifiers },
    /// Pointer button went down over an element.
    PointerDown {
        target: Option<String>,
        button: MouseButton,
    },
    /// Pointer button was pressed and released over an element, or a button
    /// was activated from the keyboard.
    Click {
        target: Option<String>,
        button: MouseButton,
    },
}

impl Event {
    pub fn key(key: Key) -> Self {
        Event::KeyDown {
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn kind(&self) -> ListenerKind {
        match self {
            Event::KeyDown { .. } => ListenerKind::KeyDown,
            Event::PointerDown { .. } => ListenerKind::PointerDown,
            Event::Click { .. } => ListenerKind::Click,
        }
    }

    /// Tab navigation direction, if this is a Tab press.
    pub fn tab_direction(&self) -> Option<TabDirection> {
        match self {
            Event::KeyDown {
                key: Key::BackTab, ..
            } => Some(TabDirection::Backward),
            Event::KeyDown {
                key: Key::Tab,
                modifiers,
            } => Some(if modifiers.shift {
                TabDirection::Backward
            } else {
                TabDirection::Forward
            }),
            _ => None,
        }
    }
}

/// Direction of Tab navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

/// Flags a listener can set while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFlags {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Convert a terminal key event into a key-down event.
/// Release and repeat events are ignored.
pub fn from_key_event(event: &crossterm::event::KeyEvent) -> Option<Event> {
    if event.kind != crossterm::event::KeyEventKind::Press {
        return None;
    }
    Some(Event::KeyDown {
        key: event.code.into(),
        modifiers: event.modifiers.into(),
    })
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
