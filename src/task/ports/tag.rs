//! Repository port for tag persistence.

use crate::task::domain::{Tag, TagId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tag repository operations.
pub type TagRepositoryResult<T> = Result<T, TagRepositoryError>;

/// Tag persistence contract. Tag names are unique, ignoring case.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::DuplicateTag`] when the ID exists or
    /// [`TagRepositoryError::DuplicateTagName`] when the name is taken.
    async fn store(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>>;

    /// Finds a tag by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> TagRepositoryResult<Option<Tag>>;

    /// Returns every tag ordered by name.
    async fn list_all(&self) -> TagRepositoryResult<Vec<Tag>>;
}

/// Errors returned by tag repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TagRepositoryError {
    /// A tag with the same identifier already exists.
    #[error("duplicate tag identifier: {0}")]
    DuplicateTag(TagId),

    /// Another tag already uses the name.
    #[error("duplicate tag name: {0}")]
    DuplicateTagName(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TagRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
