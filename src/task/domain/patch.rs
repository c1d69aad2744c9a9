//! Partial-update values for task patches.

use super::{TaskDomainError, TaskTitle, validate_title};
use serde::{Deserialize, Deserializer};

/// Presence-aware value of a single field in a partial update.
///
/// Distinguishes a field that was omitted from one that was explicitly set
/// to `null`. When deserialized with `#[serde(default)]`, a missing key
/// becomes [`FieldPatch::Absent`], `null` becomes [`FieldPatch::Null`], and
/// any other value becomes [`FieldPatch::Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// The field was not supplied; the stored value is kept.
    #[default]
    Absent,
    /// The field was explicitly set to null.
    Null,
    /// The field was supplied with a value.
    Value(T),
}

impl<T> FieldPatch<T> {
    /// Converts a field that must not be cleared into an optional change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NullField`] when the field was explicitly
    /// set to null.
    pub fn into_required(self, field: &'static str) -> Result<Option<T>, TaskDomainError> {
        match self {
            Self::Absent => Ok(None),
            Self::Null => Err(TaskDomainError::NullField(field)),
            Self::Value(value) => Ok(Some(value)),
        }
    }

    /// Converts a nullable field into an optional change, where
    /// `Some(None)` clears the stored value.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Null => Some(None),
            Self::Value(value) => Some(Some(value)),
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Validated set of changes to apply to a task.
///
/// `None` leaves the stored value untouched. For `description`,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement completion flag.
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// Validates raw patch fields using the same title rules as creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title is invalid, or when `title`
    /// or `is_completed` is explicitly null.
    pub fn from_fields(
        title: FieldPatch<String>,
        description: FieldPatch<String>,
        is_completed: FieldPatch<bool>,
    ) -> Result<Self, TaskDomainError> {
        let validated_title = title
            .into_required("title")?
            .map(|raw| validate_title(&raw))
            .transpose()?;
        let completion = is_completed.into_required("is_completed")?;

        Ok(Self {
            title: validated_title,
            description: description.into_nullable(),
            is_completed: completion,
        })
    }

    /// Returns `true` when the patch changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }
}
