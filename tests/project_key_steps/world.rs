//! Shared world state for project key BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectId},
    services::{ProjectLifecycleError, ProjectLifecycleService},
};

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = ProjectLifecycleService<InMemoryProjectRepository, DefaultClock>;

/// Scenario world for project key behaviour tests.
pub struct ProjectKeyWorld {
    pub service: TestLifecycle,
    pub projects_by_name: HashMap<String, ProjectId>,
    pub last_creation: Option<Result<Project, ProjectLifecycleError>>,
}

impl ProjectKeyWorld {
    /// Creates a world with an empty project store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: ProjectLifecycleService::new(
                Arc::new(InMemoryProjectRepository::new()),
                Arc::new(DefaultClock),
            ),
            projects_by_name: HashMap::new(),
            last_creation: None,
        }
    }

    /// Returns the identifier of a project declared by name.
    ///
    /// # Errors
    ///
    /// Returns an error when no project with that name was created.
    pub fn project_id(&self, name: &str) -> eyre::Result<ProjectId> {
        self.projects_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown project {name} in scenario world"))
    }
}

impl Default for ProjectKeyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectKeyWorld {
    ProjectKeyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
