//! Service layer assembling Kanban boards.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::Board,
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for board assembly.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Task lookup failed or returned unreadable rows.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
}

impl BoardError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Tasks(_) | Self::Projects(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Read-side service that groups a project's tasks into status columns.
#[derive(Clone)]
pub struct BoardService<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> BoardService<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Creates a board service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self { tasks, projects }
    }

    /// Builds the board for a project.
    ///
    /// Every caller sees every task; see [`Board::can_move`] for who may
    /// move them.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ProjectNotFound`] when the project does not
    /// exist, or [`BoardError::Tasks`] when the task store fails or holds
    /// rows that cannot be read back.
    pub async fn build_board(&self, project_id: ProjectId) -> BoardResult<Board> {
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(BoardError::ProjectNotFound(project_id));
        }

        let tasks = self
            .tasks
            .list_by_project(project_id)
            .await
            .inspect_err(|err| {
                tracing::error!(%project_id, error = %err, "board task lookup failed");
            })?;

        let board = Board::assemble(project_id, tasks);
        tracing::debug!(
            %project_id,
            total = board.total_tasks(),
            dropped = board.dropped(),
            "board assembled"
        );
        Ok(board)
    }

    /// Returns active projects ordered by name, for choosing a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Projects`] when lookup fails.
    pub async fn active_projects(&self) -> BoardResult<Vec<Project>> {
        let mut projects = self.projects.list_active().await?;
        projects.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(projects)
    }
}
