//! Repository port for user persistence and lookup.

use crate::user::domain::{User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`],
    /// [`UserRepositoryError::DuplicateUsername`], or
    /// [`UserRepositoryError::DuplicateEmail`] when a unique field is taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist, or a duplicate error when a changed unique field is taken.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by login name.
    ///
    /// Returns `None` when no user has the given username.
    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalized (lowercase) email address.
    ///
    /// Returns `None` when no user has the given email.
    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>>;

    /// Returns all users ordered by username.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// A user with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(String),

    /// A user with the same email already exists.
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error reports a uniqueness violation.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUser(_) | Self::DuplicateUsername(_) | Self::DuplicateEmail(_)
        )
    }
}
