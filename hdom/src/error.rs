use thiserror::Error;

/// Errors raised by document tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// No element with this id is mounted.
    #[error("no element with id '{0}'")]
    NoSuchElement(String),

    /// An element with this id is already mounted.
    #[error("duplicate element id '{0}'")]
    DuplicateId(String),

    /// The body element cannot be removed or replaced.
    #[error("the document body cannot be removed")]
    RootRemoval,
}
