//! Application services for the task workflow, tagging and board assembly.

mod board;
mod tagging;
mod workflow;

pub use board::{BoardError, BoardResult, BoardService};
pub use tagging::{TaggingError, TaggingResult, TaggingService};
pub use workflow::{StatusChange, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
