//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use task_api::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

use crate::test_helpers::SteppingClock;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, SteppingClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub current_task: Option<Task>,
    pub original_task: Option<Task>,
    pub listed_tasks: Vec<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(SteppingClock::new()),
            ),
            current_task: None,
            original_task: None,
            listed_tasks: Vec::new(),
            last_result: None,
        }
    }

    /// Returns the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }

    /// Records an operation outcome, tracking the task when it succeeded.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(task) = &result {
            self.current_task = Some(task.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
