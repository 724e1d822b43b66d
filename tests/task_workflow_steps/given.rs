//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::project::domain::NewProject;
use taskboard::task::domain::{NewTask, TaskKind, TaskStatus};
use taskboard::user::{
    domain::{NewUser, User, UserRole},
    ports::UserRepository,
};

fn declare_user(
    world: &mut TaskWorkflowWorld,
    username: String,
    role: UserRole,
) -> Result<(), eyre::Report> {
    let user = User::new(
        NewUser::new(username.as_str(), format!("{username}@example.com")).with_role(role),
        &DefaultClock,
    )?;
    run_async(world.users.store(&user)).wrap_err("store scenario user")?;
    world.people.insert(username, user);
    Ok(())
}

#[given(r#"an administrator "{username}""#)]
fn administrator(world: &mut TaskWorkflowWorld, username: String) -> Result<(), eyre::Report> {
    declare_user(world, username, UserRole::Admin)
}

#[given(r#"a worker "{username}""#)]
fn worker(world: &mut TaskWorkflowWorld, username: String) -> Result<(), eyre::Report> {
    declare_user(world, username, UserRole::Worker)
}

#[given(r#"a project "{name}" with key "{key}""#)]
fn project(world: &mut TaskWorkflowWorld, name: String, key: String) -> Result<(), eyre::Report> {
    let created = run_async(world.lifecycle.create_project(NewProject::new(name, key)))
        .wrap_err("create scenario project")?;
    world.project = Some(created);
    Ok(())
}

fn create_task(
    world: &mut TaskWorkflowWorld,
    title: String,
    assignee: Option<String>,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?
        .id();
    let mut request = NewTask::new(title, TaskKind::bug(), project_id, world.creator()?.id());
    if let Some(username) = assignee {
        request = request
            .with_assignee(world.person(&username)?.id())
            .with_status(TaskStatus::Assigned);
    }
    let created =
        run_async(world.workflow.create_task(request)).wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"a task "{title}" assigned to "{username}""#)]
fn assigned_task(
    world: &mut TaskWorkflowWorld,
    title: String,
    username: String,
) -> Result<(), eyre::Report> {
    create_task(world, title, Some(username))
}

#[given(r#"an unassigned task "{title}""#)]
fn unassigned_task(world: &mut TaskWorkflowWorld, title: String) -> Result<(), eyre::Report> {
    create_task(world, title, None)
}
