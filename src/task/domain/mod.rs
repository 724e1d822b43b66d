//! Domain model for tasks, tags, and board columns.
//!
//! Bug and feature tasks share one record; the variant-specific payload
//! lives in [`TaskKind`] and never influences workflow or ownership rules.

mod board;
mod error;
mod ids;
mod kind;
mod status;
mod tag;
mod task;

pub use board::{Board, BoardColumn};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TagId, TaskId};
pub use kind::{BugDetails, FeatureDetails, TaskKind};
pub use status::{TaskPriority, TaskStatus};
pub use tag::{DEFAULT_TAG_COLOR, Tag, TagColor};
pub use task::{MAX_TITLE_LENGTH, NewTask, PersistedTaskData, Task, TaskDetailsUpdate};
