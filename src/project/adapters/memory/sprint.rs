//! In-memory repository for sprints.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{ProjectId, Sprint, SprintId},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    sprints: Arc<RwLock<HashMap<SprintId, Sprint>>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> SprintRepositoryError {
    SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(lock_error)?;
        if sprints.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::DuplicateSprint(sprint.id()));
        }
        sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(lock_error)?;
        if !sprints.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::NotFound(sprint.id()));
        }
        sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        Ok(sprints.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        let sprints = self.sprints.read().map_err(lock_error)?;
        let mut found: Vec<Sprint> = sprints
            .values()
            .filter(|s| s.project_id() == project_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| Reverse(s.start()));
        Ok(found)
    }
}
