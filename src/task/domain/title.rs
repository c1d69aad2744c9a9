//! Validated task title.

use super::TaskDomainError;
use std::fmt;

/// Maximum title length, in characters, after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Task title that is trimmed, non-empty, and at most
/// [`MAX_TITLE_LENGTH`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title. Equivalent to [`validate_title`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::TitleTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        validate_title(value.as_ref())
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trims `raw` and checks the title length rules shared by create and update.
///
/// Length is counted in Unicode scalar values, not bytes.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyTitle`] when nothing remains after
/// trimming, or [`TaskDomainError::TitleTooLong`] when the trimmed value has
/// more than [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(raw: &str) -> Result<TaskTitle, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }

    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TaskDomainError::TitleTooLong { length });
    }

    Ok(TaskTitle(trimmed.to_owned()))
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
