//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::config::EngineConfig;
use taskboard::project::{
    adapters::memory::{InMemoryProjectRepository, InMemorySprintRepository},
    domain::{NewProject, Project},
    services::{ProjectLifecycleService, SprintPlanningService},
};
use taskboard::task::{
    adapters::memory::{InMemoryTagRepository, InMemoryTaskRepository},
    domain::{NewTask, Task, TaskKind, TaskStatus},
    services::{BoardService, TaggingService, TaskWorkflowService},
};
use taskboard::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{NewUser, User, UserRole},
    services::UserManagementService,
};

/// User administration service over in-memory stores.
pub type Accounts = UserManagementService<InMemoryUserRepository, DefaultClock>;
/// Workflow service over in-memory stores.
pub type Workflow = TaskWorkflowService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;
/// Board service over in-memory stores.
pub type Boards = BoardService<InMemoryTaskRepository, InMemoryProjectRepository>;
/// Project lifecycle service over in-memory stores.
pub type Lifecycle = ProjectLifecycleService<InMemoryProjectRepository, DefaultClock>;
/// Sprint planning service over in-memory stores.
pub type Sprints =
    SprintPlanningService<InMemoryProjectRepository, InMemorySprintRepository, DefaultClock>;
/// Tagging service over in-memory stores.
pub type Tagging = TaggingService<InMemoryTaskRepository, InMemoryTagRepository, DefaultClock>;

/// Every service wired over one shared set of stores.
pub struct Engine {
    pub accounts: Accounts,
    pub workflow: Workflow,
    pub boards: Boards,
    pub lifecycle: Lifecycle,
    pub sprints: Sprints,
    pub tagging: Tagging,
}

impl Engine {
    /// Wires the services with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration is unusable.
    pub fn new() -> eyre::Result<Self> {
        Self::from_config(&EngineConfig::default())
    }

    /// Wires the services with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the retirement settings are unusable.
    pub fn from_config(config: &EngineConfig) -> eyre::Result<Self> {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());

        let workflow =
            TaskWorkflowService::new(Arc::clone(&tasks), Arc::clone(&users), Arc::clone(&clock))
                .with_default_priority(config.tasks.default_priority);
        let accounts = UserManagementService::new(users, Arc::clone(&clock));
        let boards = BoardService::new(Arc::clone(&tasks), Arc::clone(&projects));
        let lifecycle = ProjectLifecycleService::with_retirement_policy(
            Arc::clone(&projects),
            Arc::clone(&clock),
            config.key_retirement_policy()?,
        );
        let sprints = SprintPlanningService::new(
            projects,
            Arc::new(InMemorySprintRepository::new()),
            Arc::clone(&clock),
        );
        let tagging = TaggingService::new(
            tasks,
            Arc::new(InMemoryTagRepository::new()),
            clock,
        );

        Ok(Self {
            accounts,
            workflow,
            boards,
            lifecycle,
            sprints,
            tagging,
        })
    }

    /// Stores a user with the given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is invalid or already stored.
    pub async fn user(&self, username: &str, role: UserRole) -> eyre::Result<User> {
        let request = NewUser::new(username, format!("{username}@example.com")).with_role(role);
        Ok(self.accounts.create_user(request).await?)
    }

    /// Creates an active project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is invalid or its key is taken.
    pub async fn project(&self, name: &str, key: &str) -> eyre::Result<Project> {
        Ok(self.lifecycle.create_project(NewProject::new(name, key)).await?)
    }

    /// Creates a bug in `project`, optionally assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is invalid.
    pub async fn task(
        &self,
        project: &Project,
        creator: &User,
        title: &str,
        assignee: Option<&User>,
    ) -> eyre::Result<Task> {
        let mut request = NewTask::new(title, TaskKind::bug(), project.id(), creator.id());
        if let Some(user) = assignee {
            request = request
                .with_assignee(user.id())
                .with_status(TaskStatus::Assigned);
        }
        Ok(self.workflow.create_task(request).await?)
    }
}
