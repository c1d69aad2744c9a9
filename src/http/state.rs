//! Shared handler state.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};

/// Lifecycle service over a runtime-selected repository.
pub type TaskService = TaskLifecycleService<dyn TaskRepository, DefaultClock>;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Task lifecycle service.
    pub tasks: TaskService,
}

impl AppState {
    /// Creates handler state around `repository` using the system clock.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            tasks: TaskLifecycleService::new(repository, Arc::new(DefaultClock)),
        }
    }
}
