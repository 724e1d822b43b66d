//! In-memory integration tests for board assembly.

use super::helpers::Engine;
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskboard::error::ErrorKind;
use taskboard::project::domain::ProjectId;
use taskboard::task::domain::{Board, TaskStatus};
use taskboard::user::domain::UserRole;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_status_changes() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let alice = engine.user("alice", UserRole::Worker).await?;
    let project = engine.project("Website", "WR").await?;
    let first = engine.task(&project, &admin, "First", Some(&alice)).await?;
    let second = engine.task(&project, &admin, "Second", None).await?;

    engine
        .workflow
        .change_status(first.id(), TaskStatus::Review, alice.as_caller())
        .await?;
    let board = engine.boards.build_board(project.id()).await?;

    let review = board
        .column(TaskStatus::Review)
        .ok_or_eyre("missing review column")?;
    let todo = board.column(TaskStatus::Todo).ok_or_eyre("missing todo column")?;
    ensure!(review.tasks().iter().map(|t| t.id()).eq([first.id()]));
    ensure!(todo.tasks().iter().map(|t| t.id()).eq([second.id()]));
    ensure!(board.columns().len() == TaskStatus::ALL.len());
    ensure!(board.dropped() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_caller_sees_every_task_but_moves_only_their_own() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let alice = engine.user("alice", UserRole::Worker).await?;
    let bob = engine.user("bob", UserRole::Worker).await?;
    let project = engine.project("Website", "WR").await?;
    engine.task(&project, &admin, "Alice's", Some(&alice)).await?;
    engine.task(&project, &admin, "Bob's", Some(&bob)).await?;

    let board = engine.boards.build_board(project.id()).await?;
    let assigned = board
        .column(TaskStatus::Assigned)
        .ok_or_eyre("missing assigned column")?;

    ensure!(assigned.len() == 2);
    let movable_by_alice = assigned
        .tasks()
        .iter()
        .filter(|task| Board::can_move(task, &alice.as_caller()))
        .count();
    ensure!(movable_by_alice == 1);
    ensure!(
        assigned
            .tasks()
            .iter()
            .all(|task| Board::can_move(task, &admin.as_caller()))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_has_no_board() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let result = engine.boards.build_board(ProjectId::new()).await;
    ensure!(result.is_err_and(|err| err.kind() == ErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_project_leaves_picker_but_keeps_board() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let website = engine.project("Website", "WR").await?;
    engine.project("Api", "API").await?;
    engine.task(&website, &admin, "Legacy bug", None).await?;

    engine.lifecycle.soft_delete(website.id()).await?;

    let names: Vec<String> = engine
        .boards
        .active_projects()
        .await?
        .iter()
        .map(|p| p.name().to_owned())
        .collect();
    ensure!(names == ["Api"]);
    let board = engine.boards.build_board(website.id()).await?;
    ensure!(board.total_tasks() == 1);
    Ok(())
}
