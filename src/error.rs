//! Outcome classification shared by every service error.
//!
//! Services return their own error enums; each exposes a `kind()` that maps
//! the failure onto one of the categories below so a front end can render a
//! precise message without matching on every variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced task, project, sprint, tag, or user does not exist.
    NotFound,
    /// The request is well-formed but the caller may not perform it.
    PermissionDenied,
    /// A structural invariant is violated (empty title, key too long, ...).
    ValidationFailed,
    /// A uniqueness rule was violated at the point of commit.
    Conflict,
    /// The backing store failed or returned unusable data.
    Storage,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::ValidationFailed => "validation_failed",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }

    /// Returns `true` when the caller can act on the outcome.
    ///
    /// Only storage failures are unrecoverable.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::Storage)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
