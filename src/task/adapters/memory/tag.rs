//! In-memory repository for tags.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Tag, TagId},
    ports::{TagRepository, TagRepositoryError, TagRepositoryResult},
};

/// Thread-safe in-memory tag repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagRepository {
    state: Arc<RwLock<InMemoryTagState>>,
}

#[derive(Debug, Default)]
struct InMemoryTagState {
    tags: HashMap<TagId, Tag>,
    name_index: HashMap<String, TagId>,
}

impl InMemoryTagRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TagRepositoryError {
    TagRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn store(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tags.contains_key(&tag.id()) {
            return Err(TagRepositoryError::DuplicateTag(tag.id()));
        }
        let key = name_key(tag.name());
        if state.name_index.contains_key(&key) {
            return Err(TagRepositoryError::DuplicateTagName(tag.name().to_owned()));
        }
        state.name_index.insert(key, tag.id());
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> TagRepositoryResult<Option<Tag>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .name_index
            .get(&name_key(name))
            .and_then(|id| state.tags.get(id))
            .cloned())
    }

    async fn list_all(&self) -> TagRepositoryResult<Vec<Tag>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tags: Vec<Tag> = state.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tags)
    }
}
