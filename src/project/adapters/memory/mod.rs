//! In-memory project and sprint stores.

mod project;
mod sprint;

pub use project::InMemoryProjectRepository;
pub use sprint::InMemorySprintRepository;
