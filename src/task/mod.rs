//! Task workflow and Kanban board assembly.
//!
//! Tasks move through a five-state workflow (`Todo`, `Assigned`,
//! `InProgress`, `Review`, `Done`). Any state may follow any other; what is
//! restricted is who may request the move. Administrators may move every
//! task, workers only the tasks assigned to them. The board view groups a
//! project's tasks into one column per state, oldest first, and shows every
//! task to every caller.
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
