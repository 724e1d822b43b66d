//! Service layer for planning sprints within a project.

use crate::error::ErrorKind;
use crate::project::{
    domain::{NewSprint, ProjectDomainError, ProjectId, Sprint, SprintId},
    ports::{ProjectRepository, ProjectRepositoryError, SprintRepository, SprintRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for sprint planning.
#[derive(Debug, Error)]
pub enum SprintPlanningError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),
    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Sprint persistence failed.
    #[error(transparent)]
    Sprints(#[from] SprintRepositoryError),
}

impl SprintPlanningError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::ProjectNotFound(_)
            | Self::SprintNotFound(_)
            | Self::Sprints(SprintRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Sprints(SprintRepositoryError::DuplicateSprint(_)) => ErrorKind::Conflict,
            Self::Projects(_) | Self::Sprints(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for sprint planning operations.
pub type SprintPlanningResult<T> = Result<T, SprintPlanningError>;

/// Sprint planning orchestration service.
#[derive(Clone)]
pub struct SprintPlanningService<P, S, C>
where
    P: ProjectRepository,
    S: SprintRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    sprints: Arc<S>,
    clock: Arc<C>,
}

impl<P, S, C> SprintPlanningService<P, S, C>
where
    P: ProjectRepository,
    S: SprintRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sprint planning service.
    #[must_use]
    pub const fn new(projects: Arc<P>, sprints: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            projects,
            sprints,
            clock,
        }
    }

    /// Plans a new, inactive sprint for an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::ProjectNotFound`] when the project does
    /// not exist, [`SprintPlanningError::Domain`] when the name or dates are
    /// invalid, or a repository error when persistence fails.
    pub async fn create_sprint(&self, request: NewSprint) -> SprintPlanningResult<Sprint> {
        let project_id = request.project_id();
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(SprintPlanningError::ProjectNotFound(project_id));
        }

        let sprint = Sprint::new(request, &*self.clock)?;
        self.sprints.store(&sprint).await?;
        tracing::info!(sprint_id = %sprint.id(), project_id = %project_id, "sprint planned");
        Ok(sprint)
    }

    /// Returns a project's sprints, latest start first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Sprints`] when lookup fails.
    pub async fn list_sprints(&self, project_id: ProjectId) -> SprintPlanningResult<Vec<Sprint>> {
        Ok(self.sprints.list_by_project(project_id).await?)
    }

    /// Marks a sprint as running.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or a repository error when persistence fails.
    pub async fn activate_sprint(&self, id: SprintId) -> SprintPlanningResult<Sprint> {
        let mut sprint = self.find_by_id_or_error(id).await?;
        sprint.activate();
        self.sprints.update(&sprint).await?;
        Ok(sprint)
    }

    /// Marks a sprint as not running.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or a repository error when persistence fails.
    pub async fn deactivate_sprint(&self, id: SprintId) -> SprintPlanningResult<Sprint> {
        let mut sprint = self.find_by_id_or_error(id).await?;
        sprint.deactivate();
        self.sprints.update(&sprint).await?;
        Ok(sprint)
    }

    async fn find_by_id_or_error(&self, id: SprintId) -> SprintPlanningResult<Sprint> {
        self.sprints
            .find_by_id(id)
            .await?
            .ok_or(SprintPlanningError::SprintNotFound(id))
    }
}
