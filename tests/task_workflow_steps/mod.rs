//! Step definitions for task workflow scenarios.

pub mod world;

mod given;
mod then;
mod when;
