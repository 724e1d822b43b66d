//! Service layer for creating, activating and deactivating user accounts.

use crate::error::ErrorKind;
use crate::user::{
    domain::{NewUser, User, UserDomainError, UserId, normalize_email},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user administration.
#[derive(Debug, Error)]
pub enum UserManagementError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Another account already uses the username.
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    /// Another account already uses the email address.
    #[error("email already registered: {0}")]
    EmailTaken(String),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl UserManagementError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::NotFound(_) | Self::Repository(UserRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::UsernameTaken(_)
            | Self::EmailTaken(_)
            | Self::Repository(
                UserRepositoryError::DuplicateUser(_)
                | UserRepositoryError::DuplicateUsername(_)
                | UserRepositoryError::DuplicateEmail(_),
            ) => ErrorKind::Conflict,
            Self::Repository(UserRepositoryError::Persistence(_)) => ErrorKind::Storage,
        }
    }
}

/// Result type for user administration operations.
pub type UserManagementResult<T> = Result<T, UserManagementError>;

fn uniqueness_conflict(err: UserRepositoryError) -> UserManagementError {
    match err {
        UserRepositoryError::DuplicateUsername(name) => UserManagementError::UsernameTaken(name),
        UserRepositoryError::DuplicateEmail(email) => UserManagementError::EmailTaken(email),
        other => UserManagementError::Repository(other),
    }
}

/// User administration service.
///
/// Deactivated accounts stay stored so tasks keep their creator and
/// assignee references; they are only hidden from [`Self::list_active`].
#[derive(Clone)]
pub struct UserManagementService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserManagementService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a user administration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new active user.
    ///
    /// Username and email availability are checked before the write; a
    /// writer racing past the checks receives the same typed conflict.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Domain`] for malformed input,
    /// [`UserManagementError::UsernameTaken`] or
    /// [`UserManagementError::EmailTaken`] when a unique field is in use, or
    /// [`UserManagementError::Repository`] when persistence fails.
    pub async fn create_user(&self, request: NewUser) -> UserManagementResult<User> {
        let user = User::new(request, &*self.clock)?;
        if self
            .repository
            .find_by_username(user.username())
            .await?
            .is_some()
        {
            return Err(UserManagementError::UsernameTaken(user.username().to_owned()));
        }
        if self.repository.find_by_email(user.email()).await?.is_some() {
            return Err(UserManagementError::EmailTaken(user.email().to_owned()));
        }

        self.repository
            .store(&user)
            .await
            .map_err(uniqueness_conflict)?;
        tracing::info!(
            user_id = %user.id(),
            username = user.username(),
            role = user.role().as_str(),
            "user created"
        );
        Ok(user)
    }

    /// Reactivates a deactivated account. Active accounts are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::NotFound`] when the user does not exist
    /// or [`UserManagementError::Repository`] when persistence fails.
    pub async fn activate_user(&self, id: UserId) -> UserManagementResult<User> {
        let mut user = self.find_by_id_or_error(id).await?;
        if user.is_active() {
            return Ok(user);
        }
        user.activate();
        self.repository.update(&user).await?;
        tracing::info!(user_id = %id, "user activated");
        Ok(user)
    }

    /// Deactivates an account without removing it. Inactive accounts are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::NotFound`] when the user does not exist
    /// or [`UserManagementError::Repository`] when persistence fails.
    pub async fn deactivate_user(&self, id: UserId) -> UserManagementResult<User> {
        let mut user = self.find_by_id_or_error(id).await?;
        if !user.is_active() {
            return Ok(user);
        }
        user.deactivate();
        self.repository.update(&user).await?;
        tracing::info!(user_id = %id, "user deactivated");
        Ok(user)
    }

    /// Returns `true` when no account uses `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Domain`] for a blank username or
    /// [`UserManagementError::Repository`] when lookup fails.
    pub async fn is_username_available(&self, username: &str) -> UserManagementResult<bool> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUsername.into());
        }
        Ok(self.repository.find_by_username(trimmed).await?.is_none())
    }

    /// Returns `true` when no account uses `email`, compared without regard
    /// to case.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Domain`] for a malformed address or
    /// [`UserManagementError::Repository`] when lookup fails.
    pub async fn is_email_available(&self, email: &str) -> UserManagementResult<bool> {
        let normalized = normalize_email(email)?;
        Ok(self.repository.find_by_email(&normalized).await?.is_none())
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserManagementResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns active users ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Repository`] when lookup fails.
    pub async fn list_active(&self) -> UserManagementResult<Vec<User>> {
        let users = self.repository.list_all().await?;
        Ok(users.into_iter().filter(User::is_active).collect())
    }

    /// Returns every user, including deactivated ones.
    ///
    /// # Errors
    ///
    /// Returns [`UserManagementError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> UserManagementResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }

    async fn find_by_id_or_error(&self, id: UserId) -> UserManagementResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserManagementError::NotFound(id))
    }
}
