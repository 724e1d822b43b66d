//! Error types for project and sprint validation.

use super::ProjectId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project key is empty after trimming.
    #[error("project key must not be empty")]
    EmptyProjectKey,

    /// The project key exceeds the maximum length.
    #[error("project key '{key}' exceeds {max} characters")]
    ProjectKeyTooLong {
        /// The rejected key.
        key: String,
        /// Maximum permitted length.
        max: usize,
    },

    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptySprintName,

    /// The sprint ends before it starts.
    #[error("sprint end {end} precedes start {start}")]
    InvalidSprintDates {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// Soft-deleted projects keep their retired key.
    #[error("cannot change the key of soft-deleted project {0}")]
    RetiredProjectKeyChange(ProjectId),

    /// The retired-key marker is empty.
    #[error("retired key marker must not be empty")]
    EmptyRetirementMarker,

    /// The retired-key timestamp format is not a valid strftime pattern.
    #[error("invalid retired key timestamp format '{0}'")]
    InvalidRetirementTimestampFormat(String),
}
