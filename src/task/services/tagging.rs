//! Service layer for tags and their attachment to tasks.

use crate::error::ErrorKind;
use crate::task::{
    domain::{Tag, TagColor, TagId, Task, TaskDomainError, TaskId},
    ports::{TagRepository, TagRepositoryError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for tagging.
#[derive(Debug, Error)]
pub enum TaggingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The tag does not exist.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),
    /// Another tag already uses the name.
    #[error("tag name already in use: {0}")]
    NameConflict(String),
    /// Task persistence failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Tag persistence failed.
    #[error(transparent)]
    Tags(#[from] TagRepositoryError),
}

impl TaggingError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailed,
            Self::TaskNotFound(_)
            | Self::TagNotFound(_)
            | Self::Tasks(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::NameConflict(_)
            | Self::Tags(
                TagRepositoryError::DuplicateTag(_) | TagRepositoryError::DuplicateTagName(_),
            ) => ErrorKind::Conflict,
            Self::Tasks(_) | Self::Tags(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for tagging operations.
pub type TaggingResult<T> = Result<T, TaggingError>;

fn name_conflict(err: TagRepositoryError) -> TaggingError {
    match err {
        TagRepositoryError::DuplicateTagName(name) => TaggingError::NameConflict(name),
        other => TaggingError::Tags(other),
    }
}

/// Tag management service.
#[derive(Clone)]
pub struct TaggingService<T, G, C>
where
    T: TaskRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    tags: Arc<G>,
    clock: Arc<C>,
}

impl<T, G, C> TaggingService<T, G, C>
where
    T: TaskRepository,
    G: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a tagging service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, tags: Arc<G>, clock: Arc<C>) -> Self {
        Self { tasks, tags, clock }
    }

    /// Creates a tag. `color` must be `#RRGGBB`; grey is used when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::Domain`] for a blank name or malformed
    /// colour, [`TaggingError::NameConflict`] when the name is taken, or a
    /// repository error when persistence fails.
    pub async fn create_tag(&self, name: &str, color: Option<&str>) -> TaggingResult<Tag> {
        let tag_color = color.map(TagColor::new).transpose()?;
        let tag = Tag::new(name, tag_color, &*self.clock)?;
        self.tags.store(&tag).await.map_err(name_conflict)?;
        tracing::info!(tag_id = %tag.id(), name = tag.name(), "tag created");
        Ok(tag)
    }

    /// Returns every tag ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::Tags`] when lookup fails.
    pub async fn list_tags(&self) -> TaggingResult<Vec<Tag>> {
        Ok(self.tags.list_all().await?)
    }

    /// Attaches an existing tag to a task. Attaching twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::TaskNotFound`] or [`TaggingError::TagNotFound`]
    /// when either side is missing, or a repository error when persistence
    /// fails.
    pub async fn tag_task(&self, task_id: TaskId, tag_id: TagId) -> TaggingResult<Task> {
        let mut task = self.find_task(task_id).await?;
        if self.tags.find_by_id(tag_id).await?.is_none() {
            return Err(TaggingError::TagNotFound(tag_id));
        }
        if task.add_tag(tag_id, &*self.clock) {
            self.tasks.update(&task).await?;
        }
        Ok(task)
    }

    /// Detaches a tag from a task. Detaching an absent tag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::TaskNotFound`] when the task is missing or a
    /// repository error when persistence fails.
    pub async fn untag_task(&self, task_id: TaskId, tag_id: TagId) -> TaggingResult<Task> {
        let mut task = self.find_task(task_id).await?;
        if task.remove_tag(tag_id, &*self.clock) {
            self.tasks.update(&task).await?;
        }
        Ok(task)
    }

    async fn find_task(&self, id: TaskId) -> TaggingResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaggingError::TaskNotFound(id))
    }
}
