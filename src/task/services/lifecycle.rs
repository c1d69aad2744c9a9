//! Service layer for task creation, lookup, partial update, and deletion.

use crate::task::{
    domain::{FieldPatch, Task, TaskDomainError, TaskId, TaskPatch, validate_title},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description. It is stored exactly as given.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or clears the task description.
    #[must_use]
    pub fn with_optional_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Request payload for a partial task update.
///
/// Every field defaults to [`FieldPatch::Absent`]; an empty request only
/// refreshes `updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: FieldPatch<String>,
    description: FieldPatch<String>,
    is_completed: FieldPatch<bool>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request from raw presence-aware fields.
    #[must_use]
    pub const fn from_fields(
        title: FieldPatch<String>,
        description: FieldPatch<String>,
        is_completed: FieldPatch<bool>,
    ) -> Self {
        Self {
            title,
            description,
            is_completed,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldPatch::Value(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldPatch::Value(description.into());
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = FieldPatch::Null;
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = FieldPatch::Value(is_completed);
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        TaskPatch::from_fields(self.title, self.description, self.is_completed)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Caller-supplied data violates a field rule.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// No task exists with the given identifier.
    #[error("Task with id {0} not found")]
    NotFound(TaskId),
    /// The repository could not complete the operation.
    #[error(transparent)]
    Storage(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The repository may be a trait object so the storage backend can be chosen
/// at runtime.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_task_or_error(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Creates a new, incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the title is empty or
    /// too long (nothing is persisted), or [`TaskLifecycleError::Storage`]
    /// when the repository rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = validate_title(&request.title)?;
        let task = Task::new(title, request.description, &*self.clock);
        let stored = self.repository.insert(&task).await?;
        tracing::info!(task_id = %stored.id(), "task created");
        Ok(stored)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Storage`] when the lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        tracing::debug!(task_id = %id, "fetching task");
        self.find_task_or_error(id).await
    }

    /// Lists every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Storage`] when the lookup fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.list_all().await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Applies a partial update to an existing task.
    ///
    /// The task is looked up before the patch is validated, so an unknown
    /// identifier is reported as not found regardless of the patch contents.
    /// Concurrent updates to the same task are not serialized; the last write
    /// to reach storage wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Validation`] when a supplied field is invalid,
    /// or [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(id).await?;
        let patch = request.into_patch()?;
        let is_touch = patch.is_empty();
        task.apply(patch, &*self.clock);
        let stored = self.repository.update(&task).await?;
        tracing::info!(task_id = %id, touch = is_touch, "task updated");
        Ok(stored)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.find_task_or_error(id).await?;
        if !self.repository.delete(id).await? {
            return Err(TaskLifecycleError::NotFound(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}
