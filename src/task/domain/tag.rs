//! Tags attached to tasks.

use super::{TagId, TaskDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#808080";

/// Validated `#RRGGBB` color, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagColor(String);

impl TagColor {
    /// Creates a validated color.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTagColor`] unless the value is `#`
    /// followed by six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let is_valid = normalized
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if !is_valid {
            return Err(TaskDomainError::InvalidTagColor(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self(DEFAULT_TAG_COLOR.to_owned())
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label that can be attached to any number of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: String,
    color: TagColor,
    created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a tag, using [`DEFAULT_TAG_COLOR`] when `color` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTagName`] for a blank name.
    pub fn new(
        name: impl Into<String>,
        color: Option<TagColor>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTagName);
        }
        Ok(Self {
            id: TagId::new(),
            name: trimmed.to_owned(),
            color: color.unwrap_or_default(),
            created_at: clock.utc(),
        })
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tag color.
    #[must_use]
    pub const fn color(&self) -> &TagColor {
        &self.color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
