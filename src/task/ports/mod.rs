//! Port contracts for task and tag persistence.

pub mod repository;
pub mod tag;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use tag::{TagRepository, TagRepositoryError, TagRepositoryResult};
