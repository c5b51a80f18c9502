//! Error types.

use hdom::DomError;
use thiserror::Error;

/// Errors raised by the components.
///
/// All of these are programmer misuse. Interactions that simply do not apply
/// (clicking a disabled option, Tab with nothing focusable, and so on) are
/// no-ops and never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A sub-part was rendered without its root in scope.
    #[error("{part} must be rendered inside {root}")]
    MissingContext {
        /// The sub-part, e.g. "Modal.Header".
        part: &'static str,
        /// The root it needs, e.g. "Modal".
        root: &'static str,
    },

    /// Two options of one select declared the same value.
    #[error("duplicate option value '{0}'")]
    DuplicateOption(String),

    /// Document mutation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
