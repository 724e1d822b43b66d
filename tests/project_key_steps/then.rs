//! Then steps for project key BDD scenarios.

use super::world::{ProjectKeyWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::error::ErrorKind;
use taskboard::project::services::ProjectLifecycleError;

fn creation_error(world: &ProjectKeyWorld) -> Result<&ProjectLifecycleError, eyre::Report> {
    match world.last_creation.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(project)) => Err(eyre::eyre!(
            "expected creation to fail, created {}",
            project.key()
        )),
        None => Err(eyre::eyre!("missing creation result")),
    }
}

#[then("creation fails with a key conflict")]
fn fails_with_conflict(world: &ProjectKeyWorld) -> Result<(), eyre::Report> {
    let err = creation_error(world)?;
    eyre::ensure!(
        matches!(err, ProjectLifecycleError::KeyConflict(_)),
        "expected key conflict, got {err:?}"
    );
    Ok(())
}

#[then("creation fails validation")]
fn fails_validation(world: &ProjectKeyWorld) -> Result<(), eyre::Report> {
    let err = creation_error(world)?;
    eyre::ensure!(
        err.kind() == ErrorKind::ValidationFailed,
        "expected validation failure, got {err:?}"
    );
    Ok(())
}

#[then("creation succeeds")]
fn creation_succeeds(world: &ProjectKeyWorld) -> Result<(), eyre::Report> {
    match world.last_creation.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected creation to succeed, got {other:?}")),
    }
}

#[then(r#"the key "{key}" belongs to "{name}""#)]
fn key_belongs_to(world: &ProjectKeyWorld, key: String, name: String) -> Result<(), eyre::Report> {
    let expected = world.project_id(&name)?;
    let holder = run_async(world.service.find_by_key(&key))?
        .ok_or_else(|| eyre::eyre!("no project holds {key}"))?;
    eyre::ensure!(holder.id() == expected, "{key} is held by {}", holder.name());
    Ok(())
}

#[then(r#"the project "{name}" is inactive with a retired key"#)]
fn project_is_retired(world: &ProjectKeyWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.project_id(&name)?;
    let project = run_async(world.service.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("project {name} vanished"))?;
    eyre::ensure!(!project.is_active(), "{name} is still active");
    eyre::ensure!(
        project.key().as_str().contains("_deleted_"),
        "unexpected key {}",
        project.key()
    );
    Ok(())
}
