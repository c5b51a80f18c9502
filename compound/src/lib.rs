//! Headless compound components: a modal dialog and a combobox-style select.
//!
//! Both are built from an interaction engine that works against an
//! [`hdom::Document`]: focus trapping and restoration, outside-pointer
//! detection, keyboard state machines and a timed open/close lifecycle.
//! Roots own a shared controller; sub-parts are declared up front and render
//! through a [`context::RenderContext`] that fails fast outside their root.

pub mod config;
pub mod context;
pub mod error;
pub mod focus_trap;
pub mod lifecycle;
pub mod modal;
pub mod outside;
pub mod runtime;
pub mod select;

pub use error::Error;
pub use runtime::{Component, EventContext, Runtime};

pub mod prelude {
    pub use crate::config::{ModalConfig, SelectConfig, Variant, TRANSITION_DURATION};
    pub use crate::context::RenderContext;
    pub use crate::error::Error;
    pub use crate::lifecycle::{DialogState, Phase};
    pub use crate::modal::{
        Modal, ModalBody, ModalCloseButton, ModalContent, ModalFooter, ModalHeader, ModalPart,
    };
    pub use crate::runtime::{Component, EventContext, Runtime};
    pub use crate::select::{
        OptionRecord, Select, SelectGroup, SelectLabel, SelectList, SelectOption, SelectTrigger,
    };

    pub use hdom::{Document, Element, Event, Key, Modifiers};
}
