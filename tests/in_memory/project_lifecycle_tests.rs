//! In-memory integration tests for project key reclamation.

use super::helpers::Engine;
use eyre::ensure;
use rstest::rstest;
use taskboard::config::EngineConfig;
use taskboard::error::ErrorKind;
use taskboard::project::domain::{NewProject, ProjectUpdate};
use taskboard::user::domain::UserRole;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn key_is_reclaimed_after_soft_delete() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let admin = engine.user("root", UserRole::Admin).await?;
    let old = engine.project("Website", "WR").await?;
    let task = engine.task(&old, &admin, "Legacy bug", None).await?;

    let blocked = engine
        .lifecycle
        .create_project(NewProject::new("Website v2", "WR"))
        .await;
    ensure!(blocked.is_err_and(|err| err.kind() == ErrorKind::Conflict));

    let retired = engine.lifecycle.soft_delete(old.id()).await?;
    ensure!(!retired.is_active());
    ensure!(retired.key().as_str().starts_with("WR_deleted_"));

    let new = engine.project("Website v2", "WR").await?;
    ensure!(new.id() != old.id());
    ensure!(engine.lifecycle.find_by_key("WR").await?.map(|p| p.id()) == Some(new.id()));

    let stored = engine.workflow.find_by_id(task.id()).await?;
    ensure!(stored.is_some_and(|t| t.project_id() == old.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_marker_is_used_for_retired_keys() -> eyre::Result<()> {
    let config = EngineConfig::from_yaml_str(
        "projects:\n  deleted_key_marker: \"-gone-\"\n  deleted_key_timestamp_format: \"%Y\"\n",
    )?;
    let engine = Engine::from_config(&config)?;
    let project = engine.project("Website", "WR").await?;

    let retired = engine.lifecycle.soft_delete(project.id()).await?;

    let year = chrono::Utc::now().format("%Y").to_string();
    ensure!(retired.key().as_str() == format!("WR-gone-{year}"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_soft_delete_keeps_first_rewrite() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let project = engine.project("Website", "WR").await?;

    let first = engine.lifecycle.soft_delete(project.id()).await?;
    let second = engine.lifecycle.soft_delete(project.id()).await?;

    ensure!(first.key() == second.key());
    ensure!(engine.lifecycle.list_all().await?.len() == 1);
    ensure!(engine.lifecycle.list_active().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renaming_key_onto_taken_key_conflicts() -> eyre::Result<()> {
    let engine = Engine::new()?;
    let website = engine.project("Website", "WR").await?;
    engine.project("Api", "API").await?;

    let result = engine
        .lifecycle
        .update_project(website.id(), ProjectUpdate::new().with_key("API"))
        .await;
    ensure!(result.is_err_and(|err| err.kind() == ErrorKind::Conflict));

    let kept = engine
        .lifecycle
        .update_project(website.id(), ProjectUpdate::new().with_key("WR").with_name("Site"))
        .await?;
    ensure!(kept.name() == "Site");
    Ok(())
}
