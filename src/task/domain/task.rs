//! Task aggregate root.

use super::{TagId, TaskDomainError, TaskId, TaskKind, TaskPriority, TaskStatus};
use crate::project::domain::{ProjectId, SprintId};
use crate::user::domain::{Caller, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum length of a task title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

fn check_title(title: &str) -> Result<(), TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TaskDomainError::TitleTooLong {
            length,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(())
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    kind: TaskKind,
    project_id: ProjectId,
    created_by: UserId,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    sprint_id: Option<SprintId>,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    tags: BTreeSet<TagId>,
}

impl NewTask {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        kind: TaskKind,
        project_id: ProjectId,
        created_by: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind,
            project_id,
            created_by,
            status: None,
            priority: None,
            sprint_id: None,
            assignee: None,
            due_date: None,
            tags: BTreeSet::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides the initial status (`Todo` by default).
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Places the task in a sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: SprintId) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Assigns the task on creation.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Attaches tags on creation.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns every field-level validation failure, in field order.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<TaskDomainError> {
        let mut errors = Vec::new();
        if let Err(err) = check_title(&self.title) {
            errors.push(err);
        }
        if self.project_id.is_nil() {
            errors.push(TaskDomainError::MissingProject);
        }
        errors
    }

    /// Returns `true` when the title is non-blank and within bounds and a
    /// project is referenced.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] found.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        check_title(&self.title)?;
        if self.project_id.is_nil() {
            return Err(TaskDomainError::MissingProject);
        }
        Ok(())
    }
}

/// Partial edit of task fields other than status and assignee.
///
/// Only administrators may apply these edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<DateTime<Utc>>>,
    sprint_id: Option<Option<SprintId>>,
    kind: Option<TaskKind>,
}

impl TaskDetailsUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retitles the task.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Moves the task into a sprint or out of any sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: Option<SprintId>) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Replaces the variant payload.
    #[must_use]
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    kind: TaskKind,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    project_id: ProjectId,
    sprint_id: Option<SprintId>,
    created_by: UserId,
    assignee: Option<UserId>,
    tags: BTreeSet<TagId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted variant payload.
    pub kind: TaskKind,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted sprint membership.
    pub sprint_id: Option<SprintId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted tag references.
    pub tags: BTreeSet<TagId>,
}

impl Task {
    /// Creates a task from a validated request.
    ///
    /// Status defaults to [`TaskStatus::Todo`] and priority to
    /// `default_priority` when the request leaves them unset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the request is invalid.
    pub fn new(
        request: NewTask,
        default_priority: TaskPriority,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        request.validate()?;
        Ok(Self {
            id: TaskId::new(),
            title: request.title.trim().to_owned(),
            description: request.description,
            kind: request.kind,
            status: request.status.unwrap_or_default(),
            priority: request.priority.unwrap_or(default_priority),
            created_at: clock.utc(),
            updated_at: None,
            due_date: request.due_date,
            project_id: request.project_id,
            sprint_id: request.sprint_id,
            created_by: request.created_by,
            assignee: request.assignee,
            tags: request.tags,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            kind: data.kind,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
            due_date: data.due_date,
            project_id: data.project_id,
            sprint_id: data.sprint_id,
            created_by: data.created_by,
            assignee: data.assignee,
            tags: data.tags,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the variant payload.
    #[must_use]
    pub const fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp, if the task was ever changed.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint the task belongs to, if any.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the attached tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<TagId> {
        &self.tags
    }

    /// Returns `true` when `user_id` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignee == Some(user_id)
    }

    /// Returns `true` when `caller` may change this task's status:
    /// administrators always, workers only when assigned.
    #[must_use]
    pub fn can_be_moved_by(&self, caller: &Caller) -> bool {
        caller.is_admin() || self.is_assigned_to(caller.user_id())
    }

    /// Sets the workflow status.
    ///
    /// Returns `false` without touching the timestamp when the task is
    /// already in `status`.
    pub fn change_status(&mut self, status: TaskStatus, clock: &impl Clock) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.touch(clock);
        true
    }

    /// Assigns the task to a user.
    pub fn assign(&mut self, user_id: UserId, clock: &impl Clock) {
        self.assignee = Some(user_id);
        self.touch(clock);
    }

    /// Clears the assignee.
    pub fn unassign(&mut self, clock: &impl Clock) {
        self.assignee = None;
        self.touch(clock);
    }

    /// Applies a detail edit.
    ///
    /// The task is left untouched when the new title is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the new title is invalid.
    pub fn apply_details(
        &mut self,
        update: TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = update.title.as_deref() {
            check_title(title)?;
        }

        if let Some(title) = update.title {
            self.title = title.trim().to_owned();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(sprint_id) = update.sprint_id {
            self.sprint_id = sprint_id;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        self.touch(clock);
        Ok(())
    }

    /// Attaches a tag. Returns `false` when it was already attached.
    pub fn add_tag(&mut self, tag_id: TagId, clock: &impl Clock) -> bool {
        let inserted = self.tags.insert(tag_id);
        if inserted {
            self.touch(clock);
        }
        inserted
    }

    /// Detaches a tag. Returns `false` when it was not attached.
    pub fn remove_tag(&mut self, tag_id: TagId, clock: &impl Clock) -> bool {
        let removed = self.tags.remove(&tag_id);
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Returns `true` when the title or description contains `term`,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}
