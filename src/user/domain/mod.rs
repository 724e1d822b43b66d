//! Domain model for users and roles.

mod caller;
mod error;
mod ids;
mod user;

pub use caller::Caller;
pub use error::{ParseUserRoleError, UserDomainError};
pub use ids::UserId;
pub use user::{NewUser, PersistedUserData, User, UserRole, normalize_email};
