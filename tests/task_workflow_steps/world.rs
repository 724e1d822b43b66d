//! Shared world state for task workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository, domain::Project,
    services::ProjectLifecycleService,
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Board, Task},
    services::{BoardService, StatusChange, TaskWorkflowError, TaskWorkflowService},
};
use taskboard::user::{adapters::memory::InMemoryUserRepository, domain::User};

/// Workflow service type used by the BDD world.
pub type TestWorkflow =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub workflow: TestWorkflow,
    pub boards: BoardService<InMemoryTaskRepository, InMemoryProjectRepository>,
    pub lifecycle: ProjectLifecycleService<InMemoryProjectRepository, DefaultClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub people: HashMap<String, User>,
    pub project: Option<Project>,
    pub task: Option<Task>,
    pub last_move: Option<Result<StatusChange, TaskWorkflowError>>,
    pub board: Option<Board>,
}

impl TaskWorkflowWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());

        Self {
            workflow: TaskWorkflowService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            boards: BoardService::new(tasks, Arc::clone(&projects)),
            lifecycle: ProjectLifecycleService::new(projects, clock),
            users,
            people: HashMap::new(),
            project: None,
            task: None,
            last_move: None,
            board: None,
        }
    }

    /// Returns a named user from the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no user with that name was declared.
    pub fn person(&self, username: &str) -> eyre::Result<&User> {
        self.people
            .get(username)
            .ok_or_else(|| eyre::eyre!("unknown user {username} in scenario world"))
    }

    /// Returns any declared administrator, used as task creator.
    ///
    /// # Errors
    ///
    /// Returns an error when no administrator was declared.
    pub fn creator(&self) -> eyre::Result<&User> {
        self.people
            .values()
            .find(|user| user.as_caller().is_admin())
            .ok_or_else(|| eyre::eyre!("scenario needs an administrator"))
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
