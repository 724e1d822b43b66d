//! In-memory integration tests for the task workflow.

use super::helpers::Engine;
use eyre::ensure;
use rstest::rstest;
use taskboard::config::EngineConfig;
use taskboard::error::ErrorKind;
use taskboard::project::domain::NewSprint;
use taskboard::task::domain::{NewTask, TaskDetailsUpdate, TaskKind, TaskPriority, TaskStatus};
use taskboard::user::domain::UserRole;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_walks_task_through_every_column() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let alice = engine.user("alice", UserRole::Worker).await?;
    let project = engine.project("Website", "WR").await?;
    let task = engine.task(&project, &admin, "Broken login", None).await?;

    engine.workflow.assign_task(task.id(), alice.id()).await?;
    for status in [
        TaskStatus::Assigned,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ] {
        let change = engine
            .workflow
            .change_status(task.id(), status, alice.as_caller())
            .await?;
        ensure!(change.changed && change.to == status);
    }

    let back = engine
        .workflow
        .change_status(task.id(), TaskStatus::Todo, alice.as_caller())
        .await?;
    ensure!(back.from == TaskStatus::Done && back.to == TaskStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_moves_permission_to_new_assignee() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let alice = engine.user("alice", UserRole::Worker).await?;
    let bob = engine.user("bob", UserRole::Worker).await?;
    let project = engine.project("Website", "WR").await?;
    let task = engine.task(&project, &admin, "Broken login", Some(&alice)).await?;

    engine.workflow.assign_task(task.id(), bob.id()).await?;

    let denied = engine
        .workflow
        .change_status(task.id(), TaskStatus::InProgress, alice.as_caller())
        .await;
    ensure!(denied.is_err_and(|err| err.kind() == ErrorKind::PermissionDenied));
    engine
        .workflow
        .change_status(task.id(), TaskStatus::InProgress, bob.as_caller())
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_priority_and_sprint_queries() -> eyre::Result<()> {
    let config = EngineConfig::from_yaml_str("tasks:\n  default_priority: high\n")?;
    let engine = Engine::from_config(&config)?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let project = engine.project("Website", "WR").await?;
    let now = chrono::Utc::now();
    let sprint = engine
        .sprints
        .create_sprint(NewSprint::new(
            project.id(),
            "Sprint 1",
            now,
            now + chrono::Duration::days(14),
        ))
        .await?;

    let planned = engine
        .workflow
        .create_task(
            NewTask::new("Checkout", TaskKind::feature(), project.id(), admin.id())
                .with_sprint(sprint.id()),
        )
        .await?;
    let unplanned = engine.task(&project, &admin, "Backlog item", None).await?;

    ensure!(planned.priority() == TaskPriority::High);
    let in_sprint = engine.workflow.list_by_sprint(sprint.id()).await?;
    ensure!(in_sprint.len() == 1);

    engine
        .workflow
        .update_details(
            unplanned.id(),
            TaskDetailsUpdate::new().with_sprint(Some(sprint.id())),
            admin.as_caller(),
        )
        .await?;
    ensure!(engine.workflow.list_by_sprint(sprint.id()).await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tags_attach_to_workflow_tasks() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let project = engine.project("Website", "WR").await?;
    let task = engine.task(&project, &admin, "Broken login", None).await?;
    let tag = engine.tagging.create_tag("security", Some("#cc0000")).await?;

    engine.tagging.tag_task(task.id(), tag.id()).await?;

    let stored = engine.workflow.find_by_id(task.id()).await?;
    ensure!(stored.is_some_and(|t| t.tags().contains(&tag.id())));
    ensure!(tag.color().as_str() == "#CC0000");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_worker_keeps_assigned_tasks() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let alice = engine.user("alice", UserRole::Worker).await?;
    let project = engine.project("Website", "WR").await?;
    let task = engine
        .task(&project, &admin, "Broken login", Some(&alice))
        .await?;

    engine.accounts.deactivate_user(alice.id()).await?;

    let active = engine.accounts.list_active().await?;
    ensure!(active.iter().all(|user| user.id() != alice.id()));
    let assigned = engine.workflow.list_by_assignee(alice.id()).await?;
    ensure!(assigned.iter().any(|t| t.id() == task.id()));
    ensure!(!engine.accounts.is_username_available("alice").await?);
    Ok(())
}
