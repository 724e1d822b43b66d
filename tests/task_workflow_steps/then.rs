//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskStatus, services::StatusChange};

fn last_move(world: &TaskWorkflowWorld) -> Result<&StatusChange, eyre::Report> {
    match world.last_move.as_ref() {
        Some(Ok(change)) => Ok(change),
        Some(Err(err)) => Err(eyre::eyre!("expected the move to succeed, got {err}")),
        None => Err(eyre::eyre!("missing move result")),
    }
}

#[then("the move succeeds")]
fn move_succeeds(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let change = last_move(world)?;
    eyre::ensure!(change.changed, "expected a status change");
    Ok(())
}

#[then("the move reports no change")]
fn move_reports_no_change(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let change = last_move(world)?;
    eyre::ensure!(!change.changed, "expected no status change");
    Ok(())
}

#[then(r#"the move is rejected as "{kind}""#)]
fn move_is_rejected(world: &TaskWorkflowWorld, kind: String) -> Result<(), eyre::Report> {
    let Some(Err(err)) = world.last_move.as_ref() else {
        return Err(eyre::eyre!(
            "expected a rejected move, got {:?}",
            world.last_move
        ));
    };
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected {kind}, got {}",
        err.kind()
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?
        .id();
    let stored = run_async(world.workflow.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task vanished from store"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the board has {count:usize} columns")]
fn board_has_columns(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let board = world
        .board
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing board"))?;
    eyre::ensure!(board.columns().len() == count);
    eyre::ensure!(board.dropped() == 0, "well-formed data must not drop tasks");
    Ok(())
}

#[then(r#"the "{status}" column holds {count:usize} task"#)]
fn column_holds(
    world: &TaskWorkflowWorld,
    status: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let board = world
        .board
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing board"))?;
    let column = board
        .column(target)
        .ok_or_else(|| eyre::eyre!("missing {target} column"))?;
    eyre::ensure!(
        column.len() == count,
        "expected {count} tasks in {target}, found {}",
        column.len()
    );
    Ok(())
}
