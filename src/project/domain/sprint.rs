//! Sprint entity: a dated iteration within a project.

use super::{ProjectDomainError, ProjectId, SprintId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for planning a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl NewSprint {
    /// Creates a sprint request for a project.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: None,
            start,
            end,
        }
    }

    /// Sets the sprint goal or description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

/// Sprint entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted start date.
    pub start: DateTime<Utc>,
    /// Persisted end date.
    pub end: DateTime<Utc>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Sprint {
    /// Creates an inactive sprint.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptySprintName`] for a blank name and
    /// [`ProjectDomainError::InvalidSprintDates`] when `end < start`.
    pub fn new(request: NewSprint, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let name = request.name.trim().to_owned();
        if name.is_empty() {
            return Err(ProjectDomainError::EmptySprintName);
        }
        if request.end < request.start {
            return Err(ProjectDomainError::InvalidSprintDates {
                start: request.start,
                end: request.end,
            });
        }
        Ok(Self {
            id: SprintId::new(),
            project_id: request.project_id,
            name,
            description: request.description,
            start: request.start,
            end: request.end,
            is_active: false,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            start: data.start,
            end: data.end,
            is_active: data.is_active,
            created_at: data.created_at,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end date.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` when the sprint is the running iteration.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `at` falls within `[start, end]`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Marks the sprint as running.
    pub const fn activate(&mut self) {
        self.is_active = true;
    }

    /// Marks the sprint as not running.
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }
}
