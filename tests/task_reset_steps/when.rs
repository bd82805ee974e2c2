//! When steps for task reset BDD scenarios.

use super::world::{TaskResetWorld, run_async};
use rstest_bdd_macros::when;

#[when("the task is reset")]
fn reset_task(world: &mut TaskResetWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task identifier in scenario world"))?;
    world.last_reset = Some(run_async(world.admin.reset_task(task_id)));
    Ok(())
}
