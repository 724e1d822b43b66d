//! Application services for project lifecycle and sprint planning.

mod lifecycle;
mod sprint;

pub use lifecycle::{ProjectLifecycleError, ProjectLifecycleResult, ProjectLifecycleService};
pub use sprint::{SprintPlanningError, SprintPlanningResult, SprintPlanningService};
