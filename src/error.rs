use thiserror::Error;

use crate::{placeholder::Tag, value::ValueKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported type: {kind} cannot fill a `{tag}` placeholder")]
    UnsupportedType { tag: Tag, kind: ValueKind },

    /// `position` is the 1-based placeholder that found no argument left.
    #[error("not enough values to fill query: placeholder {position} needs a value, {supplied} supplied")]
    InsufficientArguments { position: usize, supplied: usize },

    #[error("failed to write query: {0}")]
    Write(#[from] std::fmt::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn unsupported(tag: Tag, kind: ValueKind) -> Self {
        Error::UnsupportedType { tag, kind }
    }
}
