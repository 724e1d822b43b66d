//! Explicit identity of the user issuing a request.

use super::UserId;
use serde::{Deserialize, Serialize};

/// The authenticated user on whose behalf an operation runs.
///
/// Passed by value into every permission-checked operation so the identity
/// and role used for a check cannot change mid-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    user_id: UserId,
    is_admin: bool,
}

impl Caller {
    /// Creates a caller from an identifier and administrator flag.
    #[must_use]
    pub const fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Creates an administrator caller.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, true)
    }

    /// Creates a worker caller.
    #[must_use]
    pub const fn worker(user_id: UserId) -> Self {
        Self::new(user_id, false)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns `true` when the caller holds the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }
}
