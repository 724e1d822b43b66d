//! When steps for project key BDD scenarios.

use super::world::{ProjectKeyWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::project::domain::NewProject;

#[when(r#"a project "{name}" is created with key "{key}""#)]
fn create_project(world: &mut ProjectKeyWorld, name: String, key: String) {
    let result = run_async(
        world
            .service
            .create_project(NewProject::new(name.as_str(), key)),
    );
    if let Ok(ref created) = result {
        world.projects_by_name.insert(name, created.id());
    }
    world.last_creation = Some(result);
}

#[when(r#"the project "{name}" is soft-deleted"#)]
fn soft_delete(world: &mut ProjectKeyWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.project_id(&name)?;
    run_async(world.service.soft_delete(id)).wrap_err("soft-delete project")?;
    Ok(())
}
