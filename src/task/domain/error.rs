//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title has {length} characters, maximum is {max}")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The task does not reference a project.
    #[error("task must belong to a project")]
    MissingProject,

    /// The tag name is empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// The tag color is not a `#RRGGBB` hex value.
    #[error("invalid tag color '{0}', expected #RRGGBB")]
    InvalidTagColor(String),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
