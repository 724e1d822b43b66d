//! Application services for user account administration.

mod management;

pub use management::{UserManagementError, UserManagementResult, UserManagementService};
