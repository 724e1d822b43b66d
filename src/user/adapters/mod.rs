//! Adapter implementations of user ports.

pub mod memory;
