//! Service layer for project creation, key uniqueness, and soft deletion.

use crate::error::ErrorKind;
use crate::project::{
    domain::{
        KeyRetirementPolicy, NewProject, Project, ProjectDomainError, ProjectId, ProjectKey,
        ProjectUpdate,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// Another project already holds the key.
    #[error("project key already in use: {0}")]
    KeyConflict(ProjectKey),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl ProjectLifecycleError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::NotFound(_) | Self::Repository(ProjectRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::KeyConflict(_)
            | Self::Repository(
                ProjectRepositoryError::DuplicateKey(_) | ProjectRepositoryError::DuplicateProject(_),
            ) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Numbered retired-key variants tried before soft deletion gives up.
const MAX_RETIREMENT_ATTEMPTS: u32 = 16;

/// Result type for project lifecycle service operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Turns a storage-level key violation into the typed conflict outcome.
fn key_conflict(err: ProjectRepositoryError) -> ProjectLifecycleError {
    match err {
        ProjectRepositoryError::DuplicateKey(key) => ProjectLifecycleError::KeyConflict(key),
        other => ProjectLifecycleError::Repository(other),
    }
}

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectLifecycleService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    retirement: KeyRetirementPolicy,
}

impl<R, C> ProjectLifecycleService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service using the default `"{key}_deleted_{timestamp}"`
    /// retirement rewrite.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_retirement_policy(repository, clock, KeyRetirementPolicy::default())
    }

    /// Creates a service with an explicit retirement rewrite.
    #[must_use]
    pub const fn with_retirement_policy(
        repository: Arc<R>,
        clock: Arc<C>,
        retirement: KeyRetirementPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            retirement,
        }
    }

    /// Returns `true` when no project other than `exclude` holds `key`.
    ///
    /// Inactive projects count: their keys stay reserved until rewritten by
    /// [`Self::soft_delete`].
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] when `key` is not a valid
    /// project key, or [`ProjectLifecycleError::Repository`] when lookup
    /// fails.
    pub async fn is_key_unique(
        &self,
        key: &str,
        exclude: Option<ProjectId>,
    ) -> ProjectLifecycleResult<bool> {
        let project_key = ProjectKey::new(key)?;
        self.is_project_key_unique(&project_key, exclude).await
    }

    async fn is_project_key_unique(
        &self,
        key: &ProjectKey,
        exclude: Option<ProjectId>,
    ) -> ProjectLifecycleResult<bool> {
        let holder = self.repository.find_by_key(key).await?;
        Ok(holder.is_none_or(|project| Some(project.id()) == exclude))
    }

    /// Creates a new active project.
    ///
    /// Key uniqueness is checked before the write so callers receive
    /// [`ProjectLifecycleError::KeyConflict`] rather than a storage error; a
    /// writer racing past the check gets the same outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError`] when validation fails, the key is
    /// taken, or persistence fails.
    pub async fn create_project(&self, request: NewProject) -> ProjectLifecycleResult<Project> {
        let key = request.validate()?;
        if !self.is_project_key_unique(&key, None).await? {
            tracing::info!(key = %key, "project key already in use");
            return Err(ProjectLifecycleError::KeyConflict(key));
        }

        let project = Project::new(request, &*self.clock)?;
        self.repository.store(&project).await.map_err(key_conflict)?;
        tracing::info!(project_id = %project.id(), key = %project.key(), "project created");
        Ok(project)
    }

    /// Applies a partial edit to a project.
    ///
    /// A project keeping its own key never conflicts with itself.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError`] when the project is missing, the
    /// edit is invalid, the new key is taken, or persistence fails.
    pub async fn update_project(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self.find_by_id_or_error(id).await?;
        let previous_key = project.key().clone();
        project.apply_update(update, &*self.clock)?;

        if *project.key() != previous_key
            && !self.is_project_key_unique(project.key(), Some(id)).await?
        {
            return Err(ProjectLifecycleError::KeyConflict(project.key().clone()));
        }

        self.repository
            .update(&project)
            .await
            .map_err(key_conflict)?;
        Ok(project)
    }

    /// Soft-deletes a project, rewriting its key so it can be reused.
    ///
    /// The stored row keeps its identifier, so tasks and sprints referencing
    /// it remain valid. Deleting an inactive project is a no-op. When another
    /// row already holds the retired key, for example after the same key was
    /// deleted twice within one timestamp tick, a numbered variant is used.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] when the project does not
    /// exist, [`ProjectLifecycleError::KeyConflict`] when every candidate key
    /// is taken, or [`ProjectLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn soft_delete(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        let project = self.find_by_id_or_error(id).await?;
        if !project.is_active() {
            tracing::debug!(project_id = %id, "project already inactive");
            return Ok(project);
        }

        let original_key = project.key().clone();
        let retired_at = self.clock.utc();
        let mut last_taken = None;
        for attempt in 0..MAX_RETIREMENT_ATTEMPTS {
            let candidate = self
                .retirement
                .retired_key_candidate(&original_key, retired_at, attempt);
            let mut retired = project.clone();
            retired.retire_as(candidate, retired_at);
            match self.repository.update(&retired).await {
                Ok(()) => {
                    tracing::info!(
                        project_id = %id,
                        original_key = %original_key,
                        retired_key = %retired.key(),
                        "project soft-deleted"
                    );
                    return Ok(retired);
                }
                Err(ProjectRepositoryError::DuplicateKey(taken)) => {
                    tracing::debug!(project_id = %id, key = %taken, "retired key taken");
                    last_taken = Some(taken);
                }
                Err(other) => return Err(other.into()),
            }
        }

        tracing::warn!(project_id = %id, key = %original_key, "no free retired key");
        Err(ProjectLifecycleError::KeyConflict(
            last_taken.unwrap_or(original_key),
        ))
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectLifecycleResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds the project currently holding `key`.
    ///
    /// Returns `Ok(None)` for keys that are well-formed but unused.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] for malformed keys or
    /// [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_key(&self, key: &str) -> ProjectLifecycleResult<Option<Project>> {
        let project_key = ProjectKey::new(key)?;
        Ok(self.repository.find_by_key(&project_key).await?)
    }

    /// Returns active projects, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn list_active(&self) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.repository.list_active().await?)
    }

    /// Returns every project, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.repository.list_all().await?)
    }

    async fn find_by_id_or_error(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectLifecycleError::NotFound(id))
    }
}
