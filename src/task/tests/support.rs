//! Shared builders for task unit tests.

use std::collections::BTreeSet;

use crate::project::domain::ProjectId;
use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskKind, TaskPriority, TaskStatus,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed instant tests offset from, so ordering does not depend on the wall
/// clock.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a stored task created `minutes` after [`epoch`].
pub fn task_at(
    project_id: ProjectId,
    status: TaskStatus,
    minutes: i64,
    assignee: Option<UserId>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: format!("task +{minutes}m"),
        description: String::new(),
        kind: TaskKind::bug(),
        status,
        priority: TaskPriority::Medium,
        created_at: epoch() + Duration::minutes(minutes),
        updated_at: None,
        due_date: None,
        project_id,
        sprint_id: None,
        created_by: UserId::new(),
        assignee,
        tags: BTreeSet::new(),
    })
}
