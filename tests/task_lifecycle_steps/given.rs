//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_api::task::services::CreateTaskRequest;

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list()).wrap_err("list tasks for empty store check")?;
    eyre::ensure!(tasks.is_empty(), "expected an empty store, found {}", tasks.len());
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_titled_exists(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create task for scenario")?;
    world.original_task = Some(created.clone());
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" exists with description "{description}""#)]
fn task_with_description_exists(
    world: &mut TaskLifecycleWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title).with_description(description)),
    )
    .wrap_err("create described task for scenario")?;
    world.original_task = Some(created.clone());
    world.current_task = Some(created);
    Ok(())
}
