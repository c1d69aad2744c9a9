//! Task aggregate root.

use super::{TaskId, TaskPatch, TaskTitle};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;

/// Number of fractional second digits kept on task timestamps.
///
/// Matches the microsecond resolution of `TIMESTAMPTZ` so a task read back
/// from storage compares equal to the value that was written.
const TIMESTAMP_PRECISION_DIGITS: u16 = 6;

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task.
    ///
    /// The clock is read once and the same instant is used for both
    /// `created_at` and `updated_at`.
    #[must_use]
    pub fn new(title: TaskTitle, description: Option<String>, clock: &impl Clock) -> Self {
        let timestamp = now(clock);
        Self {
            id: TaskId::new(),
            title,
            description,
            is_completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            is_completed: data.is_completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the supplied fields of `patch` and refreshes `updated_at`.
    ///
    /// Fields absent from the patch keep their stored values. The timestamp
    /// advances even when the patch is empty.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        let TaskPatch {
            title,
            description,
            is_completed,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(completed) = is_completed {
            self.is_completed = completed;
        }
        self.touch(clock);
    }

    /// Advances `updated_at` strictly past its previous value.
    ///
    /// Uses the clock reading when it is later than the stored timestamp,
    /// otherwise the smallest representable step after it.
    fn touch(&mut self, clock: &impl Clock) {
        let current = now(clock);
        let minimum = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = current.max(minimum);
    }
}

fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION_DIGITS)
}
