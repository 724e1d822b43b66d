//! Domain model for projects and sprints.

mod error;
mod ids;
mod key;
mod project;
mod sprint;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, SprintId};
pub use key::{
    DEFAULT_RETIRED_KEY_MARKER, DEFAULT_RETIRED_KEY_TIMESTAMP_FORMAT, KeyRetirementPolicy,
    MAX_PROJECT_KEY_LENGTH, ProjectKey,
};
pub use project::{NewProject, PersistedProjectData, Project, ProjectUpdate};
pub use sprint::{NewSprint, PersistedSprintData, Sprint};
