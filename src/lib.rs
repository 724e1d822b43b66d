//! Taskboard: task workflow and Kanban board engine.
//!
//! This crate provides the backend rules of a task-tracking application:
//! which status transitions a caller may perform, how a project's tasks are
//! laid out as board columns, and how project keys stay unique across soft
//! deletion.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`task`]: Task workflow, tagging, and board assembly
//! - [`project`]: Project key lifecycle and sprint planning
//! - [`user`]: Users, roles, and the explicit caller identity
//! - [`config`]: Engine configuration loading
//! - [`telemetry`]: Structured logging setup
//! - [`error`]: Outcome classification shared by all services

pub mod config;
pub mod error;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod user;
