//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing or patching domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming surrounding whitespace.
    #[error("Title cannot be empty or whitespace only")]
    EmptyTitle,

    /// The trimmed title is longer than [`super::MAX_TITLE_LENGTH`].
    #[error("Title must be at most {max} characters, got {length}", max = super::MAX_TITLE_LENGTH)]
    TitleTooLong {
        /// Length of the trimmed title in characters.
        length: usize,
    },

    /// A patch explicitly set a non-nullable field to null.
    #[error("{0} cannot be null")]
    NullField(&'static str),
}

impl TaskDomainError {
    /// Returns the name of the field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::NullField(field) => field,
        }
    }
}
