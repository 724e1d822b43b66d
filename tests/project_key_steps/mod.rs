//! Step definitions for project key reclamation scenarios.

pub mod world;

mod given;
mod then;
mod when;
