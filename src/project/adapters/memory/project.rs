//! In-memory repository for projects.
//!
//! Mirrors a global unique index on the key column: a key held by an inactive
//! project still blocks reuse until the project's key is rewritten.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId, ProjectKey},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    key_index: HashMap<ProjectKey, ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn newest_first(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by_key(|p| Reverse(p.created_at()));
    projects
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        if state.key_index.contains_key(project.key()) {
            return Err(ProjectRepositoryError::DuplicateKey(project.key().clone()));
        }

        state.key_index.insert(project.key().clone(), project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let old_key = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .key()
            .clone();

        if *project.key() != old_key {
            if let Some(&holder) = state.key_index.get(project.key())
                && holder != project.id()
            {
                return Err(ProjectRepositoryError::DuplicateKey(project.key().clone()));
            }
            state.key_index.remove(&old_key);
            state.key_index.insert(project.key().clone(), project.id());
        }

        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_key(&self, key: &ProjectKey) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        let project = state
            .key_index
            .get(key)
            .and_then(|id| state.projects.get(id))
            .cloned();
        Ok(project)
    }

    async fn list_active(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        let active = state
            .projects
            .values()
            .filter(|p| p.is_active())
            .cloned()
            .collect();
        Ok(newest_first(active))
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(newest_first(state.projects.values().cloned().collect()))
    }
}
