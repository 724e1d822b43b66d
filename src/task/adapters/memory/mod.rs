//! In-memory task and tag stores.

mod tag;
mod task;

pub use tag::InMemoryTagRepository;
pub use task::InMemoryTaskRepository;
