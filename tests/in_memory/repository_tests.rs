//! Record store contract tests for the in-memory adapter.

use rstest::{fixture, rstest};
use task_api::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};

use crate::test_helpers::SteppingClock;

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[fixture]
fn clock() -> SteppingClock {
    SteppingClock::new()
}

fn new_task(title: &str, clock: &SteppingClock) -> Task {
    Task::new(
        TaskTitle::new(title).expect("valid title"),
        None,
        clock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_then_find_returns_same_task(
    repository: InMemoryTaskRepository,
    clock: SteppingClock,
) {
    let task = new_task("Stored", &clock);

    let inserted = repository.insert(&task).await.expect("insert should succeed");
    let found = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(inserted, task);
    assert_eq!(found, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_insert_is_rejected(repository: InMemoryTaskRepository, clock: SteppingClock) {
    let task = new_task("Once", &clock);
    repository.insert(&task).await.expect("first insert should succeed");

    let result = repository.insert(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_unknown_id_returns_none(repository: InMemoryTaskRepository) {
    let found = repository
        .find_by_id(TaskId::new())
        .await
        .expect("lookup should succeed");
    assert_eq!(found, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_all_orders_by_created_at_descending(
    repository: InMemoryTaskRepository,
    clock: SteppingClock,
) {
    let first = new_task("First", &clock);
    let second = new_task("Second", &clock);
    let third = new_task("Third", &clock);
    for task in [&second, &first, &third] {
        repository.insert(task).await.expect("insert should succeed");
    }

    let listed = repository.list_all().await.expect("list should succeed");

    assert_eq!(listed, vec![third, second, first]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_stored_fields(repository: InMemoryTaskRepository, clock: SteppingClock) {
    let mut task = new_task("Before", &clock);
    repository.insert(&task).await.expect("insert should succeed");
    task.apply(
        TaskPatch {
            title: Some(TaskTitle::new("After").expect("valid title")),
            description: Some(Some("details".to_owned())),
            is_completed: Some(true),
        },
        &clock,
    );

    let updated = repository.update(&task).await.expect("update should succeed");
    let found = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(updated, task);
    assert_eq!(found, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_is_not_found(
    repository: InMemoryTaskRepository,
    clock: SteppingClock,
) {
    let task = new_task("Never stored", &clock);

    let result = repository.update(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    let listed = repository.list_all().await.expect("list should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_whether_a_row_was_removed(
    repository: InMemoryTaskRepository,
    clock: SteppingClock,
) {
    let task = new_task("Disposable", &clock);
    repository.insert(&task).await.expect("insert should succeed");

    let first = repository.delete(task.id()).await.expect("delete should succeed");
    let second = repository.delete(task.id()).await.expect("delete should succeed");

    assert!(first);
    assert!(!second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_share_the_same_store(repository: InMemoryTaskRepository, clock: SteppingClock) {
    let task = new_task("Shared", &clock);
    let other_handle = repository.clone();

    repository.insert(&task).await.expect("insert should succeed");

    let found = other_handle
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(found, Some(task));
}
