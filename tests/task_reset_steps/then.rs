//! Then steps for task reset BDD scenarios.

use super::world::{TaskResetWorld, run_async};
use eyre::WrapErr;
use ibwt::task::{domain::TaskStatus, ports::TaskRepository, services::TaskAdminError};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskResetWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task identifier"))?;
    let task = run_async(world.repository.find_by_id(task_id))
        .wrap_err("look up task")?
        .ok_or_else(|| eyre::eyre!("task {task_id} not stored"))?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the task has no results")]
fn task_has_no_results(world: &TaskResetWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task identifier"))?;
    let results =
        run_async(world.repository.results_for_task(task_id)).wrap_err("list task results")?;
    eyre::ensure!(results.is_empty(), "expected no results, found {}", results.len());
    Ok(())
}

#[then("the reset fails because the task was not found")]
fn reset_fails_not_found(world: &TaskResetWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_reset
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reset result"))?;

    if !matches!(result, Err(TaskAdminError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound, got {result:?}"));
    }
    Ok(())
}
