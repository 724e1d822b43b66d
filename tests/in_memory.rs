//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `workflow_tests`: Status changes, assignment, detail edits, tagging
//! - `board_tests`: Column layout and move permissions
//! - `project_lifecycle_tests`: Key uniqueness and reclamation

mod in_memory {
    pub mod helpers;

    mod board_tests;
    mod project_lifecycle_tests;
    mod workflow_tests;
}
