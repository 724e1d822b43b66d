//! Users, roles, and caller identity.
//!
//! Users are referenced by tasks as creators and assignees. Permission checks
//! in the task workflow never consult a global "current user"; they receive
//! an explicit [`domain::Caller`] instead.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Account administration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
