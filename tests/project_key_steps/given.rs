//! Given steps for project key BDD scenarios.

use super::world::{ProjectKeyWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::project::domain::NewProject;

#[given(r#"a project "{name}" with key "{key}""#)]
fn existing_project(
    world: &mut ProjectKeyWorld,
    name: String,
    key: String,
) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .service
            .create_project(NewProject::new(name.as_str(), key)),
    )
    .wrap_err("create project in scenario setup")?;
    world.projects_by_name.insert(name, project.id());
    Ok(())
}
