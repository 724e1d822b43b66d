//! User account aggregate and role types.

use super::{Caller, ParseUserRoleError, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Access-control role of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular worker: sees every task, moves only tasks assigned to them.
    #[default]
    Worker,
    /// Administrator: may move and edit every task.
    Admin,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "worker" => Ok(Self::Worker),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Input for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login name; unique across all users.
    pub username: String,
    /// Email address; unique across all users.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Access-control role.
    pub role: UserRole,
}

impl NewUser {
    /// Creates a worker registration with empty display names.
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            role: UserRole::Worker,
        }
    }

    /// Sets the display names.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// User account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: UserRole,
    is_active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted login name.
    pub username: String,
    /// Persisted email address.
    pub email: String,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted role.
    pub role: UserRole,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    ///
    /// The username is trimmed and the email is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] or
    /// [`UserDomainError::InvalidEmail`] when the input is malformed.
    pub fn new(new_user: NewUser, clock: &impl Clock) -> Result<Self, UserDomainError> {
        let username = new_user.username.trim().to_owned();
        if username.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        let email = normalize_email(&new_user.email)?;

        Ok(Self {
            id: UserId::new(),
            username,
            email,
            first_name: new_user.first_name.trim().to_owned(),
            last_name: new_user.last_name.trim().to_owned(),
            role: new_user.role,
            is_active: true,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            role: data.role,
            is_active: data.is_active,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the normalized email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns `"{first} {last}"`, falling back to the username when both
    /// names are empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.username.clone()
        } else {
            trimmed.to_owned()
        }
    }

    /// Returns the access-control role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns `true` when the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the caller identity for requests made by this user.
    #[must_use]
    pub const fn as_caller(&self) -> Caller {
        Caller::new(self.id, matches!(self.role, UserRole::Admin))
    }

    /// Marks the account active again.
    pub const fn activate(&mut self) {
        self.is_active = true;
    }

    /// Marks the account inactive. Tasks keep referencing it.
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Trims and lowercases an email address, rejecting anything not shaped
/// like `local@domain`.
///
/// # Errors
///
/// Returns [`UserDomainError::InvalidEmail`] for malformed input.
pub fn normalize_email(raw: &str) -> Result<String, UserDomainError> {
    let normalized = raw.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let is_valid = !local.is_empty()
        && !domain.is_empty()
        && parts.next().is_none()
        && !normalized.chars().any(char::is_whitespace);

    if !is_valid {
        return Err(UserDomainError::InvalidEmail(raw.to_owned()));
    }
    Ok(normalized)
}
