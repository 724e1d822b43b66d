//! Service layer for task creation, status transitions and assignment.

use crate::error::ErrorKind;
use crate::project::domain::{ProjectId, SprintId};
use crate::task::{
    domain::{NewTask, Task, TaskDetailsUpdate, TaskDomainError, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{Caller, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for the task workflow.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The caller may not perform the operation on this task.
    #[error("user {user_id} may not modify task {task_id}")]
    PermissionDenied {
        /// Task the caller tried to modify.
        task_id: TaskId,
        /// The rejected caller.
        user_id: UserId,
    },
    /// Task persistence failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

impl TaskWorkflowError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::NotFound(_)
            | Self::UserNotFound(_)
            | Self::Tasks(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Tasks(TaskRepositoryError::DuplicateTask(_)) => ErrorKind::Conflict,
            Self::Tasks(_) | Self::Users(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Outcome of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// The task that was moved.
    pub task_id: TaskId,
    /// Status before the request.
    pub from: TaskStatus,
    /// Status after the request.
    pub to: TaskStatus,
    /// `false` when the task was already in the requested status and
    /// nothing was written.
    pub changed: bool,
}

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    default_priority: TaskPriority,
}

impl<T, U, C> TaskWorkflowService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a workflow service with [`TaskPriority::Medium`] as the
    /// default priority.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
            default_priority: TaskPriority::default(),
        }
    }

    /// Sets the priority given to tasks created without one.
    #[must_use]
    pub const fn with_default_priority(mut self, priority: TaskPriority) -> Self {
        self.default_priority = priority;
        self
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the request is invalid,
    /// [`TaskWorkflowError::UserNotFound`] when the requested assignee does
    /// not exist, or a repository error when persistence fails.
    pub async fn create_task(&self, request: NewTask) -> TaskWorkflowResult<Task> {
        if let Some(assignee) = request.assignee() {
            self.ensure_user_exists(assignee).await?;
        }
        let task = Task::new(request, self.default_priority, &*self.clock)?;
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            kind = task.kind().type_name(),
            "task created"
        );
        Ok(task)
    }

    /// Moves a task to `status` on behalf of `caller`.
    ///
    /// Requesting the current status succeeds without a write. Otherwise
    /// administrators may move any task and workers only tasks assigned to
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist,
    /// [`TaskWorkflowError::PermissionDenied`] when the caller may not move
    /// it, or a repository error when persistence fails.
    pub async fn change_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        caller: Caller,
    ) -> TaskWorkflowResult<StatusChange> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        let from = task.status();
        if from == status {
            return Ok(StatusChange {
                task_id,
                from,
                to: status,
                changed: false,
            });
        }

        if !task.can_be_moved_by(&caller) {
            tracing::info!(
                task_id = %task_id,
                user_id = %caller.user_id(),
                "status change rejected"
            );
            return Err(TaskWorkflowError::PermissionDenied {
                task_id,
                user_id: caller.user_id(),
            });
        }

        let changed = task.change_status(status, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %task_id,
            user_id = %caller.user_id(),
            from = %from,
            to = %status,
            "task status changed"
        );
        Ok(StatusChange {
            task_id,
            from,
            to: status,
            changed,
        })
    }

    /// Assigns a task to an existing user.
    ///
    /// Restricting who may assign is left to the calling layer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] or
    /// [`TaskWorkflowError::UserNotFound`] when either side is missing, or a
    /// repository error when persistence fails.
    pub async fn assign_task(&self, task_id: TaskId, user_id: UserId) -> TaskWorkflowResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        self.ensure_user_exists(user_id).await?;
        task.assign(user_id, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task_id, user_id = %user_id, "task assigned");
        Ok(task)
    }

    /// Clears the assignee of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist
    /// or a repository error when persistence fails.
    pub async fn unassign_task(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        task.unassign(&*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task_id, "task unassigned");
        Ok(task)
    }

    /// Edits task fields other than status and assignee. Administrators
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::PermissionDenied`] for non-admin callers,
    /// [`TaskWorkflowError::NotFound`] when the task does not exist,
    /// [`TaskWorkflowError::Domain`] when the edit is invalid, or a
    /// repository error when persistence fails.
    pub async fn update_details(
        &self,
        task_id: TaskId,
        update: TaskDetailsUpdate,
        caller: Caller,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        if !caller.is_admin() {
            tracing::info!(
                task_id = %task_id,
                user_id = %caller.user_id(),
                "detail edit rejected"
            );
            return Err(TaskWorkflowError::PermissionDenied {
                task_id,
                user_id: caller.user_id(),
            });
        }
        task.apply_details(update, &*self.clock)?;
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task_id, user_id = %caller.user_id(), "task details updated");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Returns the tasks of a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Returns the tasks planned into a sprint, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_by_sprint(&self, sprint_id: SprintId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_by_sprint(sprint_id).await?)
    }

    /// Returns the tasks in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_by_status(status).await?)
    }

    /// Returns the tasks with `priority`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_by_priority(
        &self,
        priority: TaskPriority,
    ) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_by_priority(priority).await?)
    }

    /// Returns the tasks assigned to a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_by_assignee(&self, user_id: UserId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_by_assignee(user_id).await?)
    }

    /// Searches titles and descriptions, ignoring case. A blank term lists
    /// every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn search(&self, term: &str) -> TaskWorkflowResult<Vec<Task>> {
        let needle = term.trim();
        if needle.is_empty() {
            return self.list_all().await;
        }
        Ok(self.tasks.search(needle).await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Tasks`] when lookup fails.
    pub async fn list_all(&self) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.list_all().await?)
    }

    async fn find_by_id_or_error(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> TaskWorkflowResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(TaskWorkflowError::UserNotFound(user_id));
        }
        Ok(())
    }
}
