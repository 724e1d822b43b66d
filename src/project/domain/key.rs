//! Project keys and the retirement rewrite applied on soft deletion.

use super::ProjectDomainError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a user-chosen project key.
pub const MAX_PROJECT_KEY_LENGTH: usize = 10;

/// Marker inserted between the original key and the deletion timestamp.
pub const DEFAULT_RETIRED_KEY_MARKER: &str = "_deleted_";

/// Timestamp pattern appended to retired keys, down to milliseconds.
pub const DEFAULT_RETIRED_KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// Short human-readable project code, e.g. `WR`.
///
/// Keys built with [`ProjectKey::new`] are trimmed, non-empty, and at most
/// [`MAX_PROJECT_KEY_LENGTH`] characters. Keys loaded from storage are taken
/// verbatim because retired keys carry a suffix beyond that limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a validated project key.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectKey`] when the value is blank
    /// or [`ProjectDomainError::ProjectKeyTooLong`] when it exceeds
    /// [`MAX_PROJECT_KEY_LENGTH`] characters after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyProjectKey);
        }
        if normalized.chars().count() > MAX_PROJECT_KEY_LENGTH {
            return Err(ProjectDomainError::ProjectKeyTooLong {
                key: normalized.to_owned(),
                max: MAX_PROJECT_KEY_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Wraps a key read back from storage without validation.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rule for rewriting the key of a soft-deleted project.
///
/// The storage layer enforces key uniqueness over every row, active or not.
/// Rewriting `WR` to `WR_deleted_20260101120000123` releases `WR` for a new
/// project while the retired row keeps its identifier. When two rows retire
/// the same key at the same instant, the later one receives a numbered
/// variant such as `WR_deleted_20260101120000123_2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRetirementPolicy {
    marker: String,
    timestamp_format: String,
}

impl KeyRetirementPolicy {
    /// Creates a policy from a marker and a strftime timestamp pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyRetirementMarker`] for a blank
    /// marker and [`ProjectDomainError::InvalidRetirementTimestampFormat`]
    /// when the pattern is empty or not valid strftime.
    pub fn new(
        marker: impl Into<String>,
        timestamp_format: impl Into<String>,
    ) -> Result<Self, ProjectDomainError> {
        let marker_value = marker.into();
        let format_value = timestamp_format.into();
        if marker_value.trim().is_empty() {
            return Err(ProjectDomainError::EmptyRetirementMarker);
        }
        let has_error = StrftimeItems::new(&format_value).any(|item| matches!(item, Item::Error));
        if format_value.is_empty() || has_error {
            return Err(ProjectDomainError::InvalidRetirementTimestampFormat(
                format_value,
            ));
        }
        Ok(Self {
            marker: marker_value,
            timestamp_format: format_value,
        })
    }

    /// Returns the marker inserted after the original key.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the strftime pattern of the appended timestamp.
    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Builds `"{key}{marker}{timestamp}"` for a deletion at `at`.
    #[must_use]
    pub fn retired_key(&self, key: &ProjectKey, at: DateTime<Utc>) -> ProjectKey {
        ProjectKey(format!(
            "{key}{}{}",
            self.marker,
            at.format(&self.timestamp_format)
        ))
    }

    /// Builds the `attempt`-th candidate key for a deletion at `at`.
    ///
    /// Attempt `0` is [`Self::retired_key`]; later attempts append `_{n}`
    /// with `n` starting at 2.
    #[must_use]
    pub fn retired_key_candidate(
        &self,
        key: &ProjectKey,
        at: DateTime<Utc>,
        attempt: u32,
    ) -> ProjectKey {
        let base = self.retired_key(key, at);
        if attempt == 0 {
            return base;
        }
        ProjectKey(format!("{base}_{}", attempt.saturating_add(1)))
    }
}

impl Default for KeyRetirementPolicy {
    fn default() -> Self {
        Self {
            marker: DEFAULT_RETIRED_KEY_MARKER.to_owned(),
            timestamp_format: DEFAULT_RETIRED_KEY_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}
