//! Kanban board read model.

use super::{Task, TaskStatus};
use crate::project::domain::ProjectId;
use crate::user::domain::Caller;
use serde::Serialize;

/// One column of a board: every task in a single status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the status this column collects.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tasks in this column, oldest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Kanban board for one project.
///
/// Always holds one column per [`TaskStatus`], in declaration order, even
/// when a column is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    project_id: ProjectId,
    columns: Vec<BoardColumn>,
    dropped: usize,
}

impl Board {
    /// Groups a project's tasks into columns.
    ///
    /// Within each column tasks are ordered by creation time, oldest first;
    /// ties keep their input order. Tasks that belong to another project
    /// are left off the board and counted in [`Board::dropped`].
    #[must_use]
    pub fn assemble(project_id: ProjectId, tasks: impl IntoIterator<Item = Task>) -> Self {
        let (mut remaining, foreign): (Vec<Task>, Vec<Task>) = tasks
            .into_iter()
            .partition(|task| task.project_id() == project_id);
        for task in &foreign {
            tracing::warn!(
                task_id = %task.id(),
                task_project_id = %task.project_id(),
                %project_id,
                "task from another project left off board"
            );
        }

        let mut columns = Vec::with_capacity(TaskStatus::ALL.len());
        for status in TaskStatus::ALL {
            let (mut column_tasks, rest): (Vec<Task>, Vec<Task>) = remaining
                .into_iter()
                .partition(|task| task.status() == status);
            column_tasks.sort_by_key(Task::created_at);
            columns.push(BoardColumn {
                status,
                tasks: column_tasks,
            });
            remaining = rest;
        }

        Self {
            project_id,
            columns,
            dropped: foreign.len(),
        }
    }

    /// Returns the project the board shows.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns every column in status order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Returns the number of tasks that could not be placed on the board.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns the number of tasks placed on the board.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }

    /// Returns `true` when `caller` may drag `task` to another column.
    #[must_use]
    pub fn can_move(task: &Task, caller: &Caller) -> bool {
        task.can_be_moved_by(caller)
    }
}
