//! Project aggregate root.

use super::{KeyRetirementPolicy, ProjectDomainError, ProjectId, ProjectKey};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    key: String,
    description: Option<String>,
}

impl NewProject {
    /// Creates a request with the required name and key.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns every field-level validation failure, in field order.
    ///
    /// An empty vector means the request is valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ProjectDomainError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ProjectDomainError::EmptyProjectName);
        }
        if let Err(err) = ProjectKey::new(self.key.as_str()) {
            errors.push(err);
        }
        errors
    }

    /// Returns `true` when the name is non-blank and the key is non-blank and
    /// at most ten characters.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Validates the request and returns the normalized key.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProjectDomainError`] found.
    pub fn validate(&self) -> Result<ProjectKey, ProjectDomainError> {
        if self.name.trim().is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        ProjectKey::new(self.key.as_str())
    }
}

/// Partial edit of an existing project. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    name: Option<String>,
    key: Option<String>,
    description: Option<String>,
}

impl ProjectUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the project key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    key: ProjectKey,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted key, possibly carrying a retirement suffix.
    pub key: ProjectKey,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a new active project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when the name or key is invalid.
    pub fn new(request: NewProject, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let key = request.validate()?;
        Ok(Self {
            id: ProjectId::new(),
            name: request.name.trim().to_owned(),
            description: request.description,
            key,
            is_active: true,
            created_at: clock.utc(),
            updated_at: None,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            key: data.key,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the project key.
    #[must_use]
    pub const fn key(&self) -> &ProjectKey {
        &self.key
    }

    /// Returns `true` while the project has not been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp, if the project was ever edited.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Applies a partial edit.
    ///
    /// The project is left untouched when any field fails validation.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when the new name or key is invalid,
    /// or [`ProjectDomainError::RetiredProjectKeyChange`] when the key of a
    /// soft-deleted project would change.
    pub fn apply_update(
        &mut self,
        update: ProjectUpdate,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let name = match update.name {
            Some(name) if name.trim().is_empty() => {
                return Err(ProjectDomainError::EmptyProjectName);
            }
            Some(name) => Some(name.trim().to_owned()),
            None => None,
        };
        let key = update.key.map(ProjectKey::new).transpose()?;
        if !self.is_active
            && let Some(requested) = &key
            && *requested != self.key
        {
            return Err(ProjectDomainError::RetiredProjectKeyChange(self.id));
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_key) = key {
            self.key = new_key;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = Some(clock.utc());
        Ok(())
    }

    /// Soft-deletes the project and rewrites its key so it can be reused.
    ///
    /// Returns `false` without changes when the project is already inactive,
    /// so a retired key is never rewritten twice.
    pub fn retire(&mut self, policy: &KeyRetirementPolicy, clock: &impl Clock) -> bool {
        let now = clock.utc();
        let retired_key = policy.retired_key(&self.key, now);
        self.retire_as(retired_key, now)
    }

    /// Soft-deletes the project under an already computed retired key.
    ///
    /// Same no-op rule as [`Self::retire`].
    pub fn retire_as(&mut self, retired_key: ProjectKey, at: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        self.key = retired_key;
        self.is_active = false;
        self.updated_at = Some(at);
        true
    }
}
