pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod listeners;
pub mod scheduler;
pub mod scroll;
pub mod scroll_lock;
pub mod types;

pub use document::{Document, BODY_ID};
pub use element::{generate_id, Content, Element, Tag};
pub use error::DomError;
pub use event::{Event, EventFlags, Key, Modifiers, MouseButton, TabDirection};
pub use focus::{accepts_focus, collect_focusable, is_tabbable, FocusState};
pub use listeners::{ListenerId, ListenerKind, ListenerTarget, Listeners, OwnerId};
pub use scheduler::{FiredTask, Scheduler, TaskId, TaskKind, FRAME_INTERVAL};
pub use scroll::ScrollState;
pub use scroll_lock::{ScrollLock, ScrollLockToken};
pub use types::Overflow;
