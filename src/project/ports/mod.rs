//! Port contracts for project and sprint persistence.

pub mod repository;
pub mod sprint;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use sprint::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
