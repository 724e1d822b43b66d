//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::domain::TaskStatus;

#[when(r#""{username}" moves the task to "{status}""#)]
fn move_task(
    world: &mut TaskWorkflowWorld,
    username: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let caller = world.person(&username)?.as_caller();
    let task_id = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?
        .id();

    let result = run_async(world.workflow.change_status(task_id, target, caller));
    world.last_move = Some(result);
    Ok(())
}

#[when("the board is built")]
fn build_board(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let project_id = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?
        .id();
    let board = run_async(world.boards.build_board(project_id)).wrap_err("build board")?;
    world.board = Some(board);
    Ok(())
}
