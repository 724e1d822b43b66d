//! Project key lifecycle and sprint planning.
//!
//! Projects carry a short human-readable key that must be unique across every
//! stored project, active or not. Soft deletion rewrites the key of the
//! retired project so the original key can be claimed again while the row,
//! and every foreign key pointing at it, stays in place.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
