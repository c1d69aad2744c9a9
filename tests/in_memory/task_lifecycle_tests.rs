//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use task_api::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{FieldPatch, Task, TaskDomainError, TaskId},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};

use crate::test_helpers::SteppingClock;

type TestService = TaskLifecycleService<InMemoryTaskRepository, SteppingClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(SteppingClock::new()),
    )
}

/// Asserts tasks are ordered by `created_at`, newest first.
///
/// # Errors
///
/// Returns an error naming the first adjacent pair that is out of order.
fn assert_newest_first(tasks: &[Task]) -> Result<(), eyre::Report> {
    for pair in tasks.windows(2) {
        let [newer, older] = pair else {
            continue;
        };
        eyre::ensure!(
            newer.created_at() >= older.created_at(),
            "task {} listed before newer task {}",
            newer.id(),
            older.id()
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_through_get(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Write documentation").with_description("Create API docs"))
        .await
        .expect("task creation should succeed");

    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, created);
    assert_eq!(fetched.title().as_str(), "Write documentation");
    assert_eq!(fetched.description(), Some("Create API docs"));
    assert!(!fetched.is_completed());
    assert_eq!(fetched.created_at(), fetched.updated_at());
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(12)]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_every_task_newest_first(
    service: TestService,
    #[case] count: usize,
) -> Result<(), eyre::Report> {
    let mut created_ids = Vec::with_capacity(count);
    for index in 0..count {
        let task = service
            .create(CreateTaskRequest::new(format!("Task {index}")))
            .await?;
        created_ids.push(task.id());
    }

    let tasks = service.list().await?;

    eyre::ensure!(tasks.len() == count, "expected {count} tasks, found {}", tasks.len());
    assert_newest_first(&tasks)?;
    let listed_ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
    created_ids.reverse();
    eyre::ensure!(listed_ids == created_ids, "listing order does not match creation order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successive_updates_strictly_advance_updated_at(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Iterate"))
        .await
        .expect("task creation should succeed");

    let mut previous = created.updated_at();
    for request in [
        UpdateTaskRequest::new().with_completed(true),
        UpdateTaskRequest::new(),
        UpdateTaskRequest::new().with_title("Iterate again"),
        UpdateTaskRequest::new().with_description("notes"),
        UpdateTaskRequest::new().clear_description(),
    ] {
        let updated = service
            .update(created.id(), request)
            .await
            .expect("update should succeed");
        assert!(updated.updated_at() > previous);
        assert_eq!(updated.created_at(), created.created_at());
        previous = updated.updated_at();
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_supplied_fields(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Original").with_description("Original desc"))
        .await
        .expect("task creation should succeed");

    let updated = service
        .update(created.id(), UpdateTaskRequest::new().with_title("Renamed"))
        .await
        .expect("update should succeed");

    assert_eq!(updated.title().as_str(), "Renamed");
    assert_eq!(updated.description(), Some("Original desc"));
    assert!(!updated.is_completed());
}

#[rstest]
#[case(FieldPatch::Null, FieldPatch::Absent, "title")]
#[case(FieldPatch::Absent, FieldPatch::Null, "is_completed")]
#[tokio::test(flavor = "multi_thread")]
async fn null_for_required_field_is_rejected(
    service: TestService,
    #[case] title: FieldPatch<String>,
    #[case] is_completed: FieldPatch<bool>,
    #[case] field: &str,
) {
    let created = service
        .create(CreateTaskRequest::new("Keep"))
        .await
        .expect("task creation should succeed");

    let result = service
        .update(
            created.id(),
            UpdateTaskRequest::from_fields(title, FieldPatch::Absent, is_completed),
        )
        .await;

    match result {
        Err(TaskLifecycleError::Validation(err)) => assert_eq!(err.field(), field),
        other => panic!("expected validation error, got {other:?}"),
    }
    let fetched = service.get(created.id()).await.expect("lookup should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_titles_are_rejected_without_side_effects(service: TestService, #[case] title: &str) {
    let result = service.create(CreateTaskRequest::new(title)).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Validation(TaskDomainError::EmptyTitle))
    ));
    let tasks = service.list().await.expect("list should succeed");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_and_deleted_ids_are_not_found(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Short-lived"))
        .await
        .expect("task creation should succeed");
    service
        .delete(created.id())
        .await
        .expect("delete should succeed");

    for id in [TaskId::new(), created.id()] {
        assert!(matches!(service.get(id).await, Err(TaskLifecycleError::NotFound(_))));
        assert!(matches!(
            service.update(id, UpdateTaskRequest::new()).await,
            Err(TaskLifecycleError::NotFound(_))
        ));
        assert!(matches!(service.delete(id).await, Err(TaskLifecycleError::NotFound(_))));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_are_all_listed() {
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let worker = service.clone();
            tokio::spawn(async move {
                worker
                    .create(CreateTaskRequest::new(format!("Parallel {index}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("task should join")
            .expect("task creation should succeed");
    }

    let tasks = service.list().await.expect("list should succeed");
    assert_eq!(tasks.len(), 16);
    assert_newest_first(&tasks).expect("tasks should be ordered newest first");
}
