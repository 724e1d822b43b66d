//! Bug and feature payloads carried alongside the shared task fields.

use serde::{Deserialize, Serialize};

/// Bug-specific details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugDetails {
    /// Steps that reproduce the defect.
    pub steps_to_reproduce: Option<String>,
    /// What should happen.
    pub expected_behavior: Option<String>,
    /// What happens instead.
    pub actual_behavior: Option<String>,
    /// Environment where the defect was observed.
    pub environment: Option<String>,
    /// Free-form severity label.
    pub severity: Option<String>,
}

/// Feature-specific details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDetails {
    /// Conditions the feature must satisfy to be accepted.
    pub acceptance_criteria: String,
    /// Relative size estimate.
    pub story_points: Option<u32>,
    /// Epic the feature belongs to.
    pub epic: Option<String>,
}

/// Task variant with its variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// A defect report.
    Bug(BugDetails),
    /// A feature request.
    Feature(FeatureDetails),
}

impl TaskKind {
    /// Creates a bug payload with no details.
    #[must_use]
    pub fn bug() -> Self {
        Self::Bug(BugDetails::default())
    }

    /// Creates a feature payload with no details.
    #[must_use]
    pub fn feature() -> Self {
        Self::Feature(FeatureDetails::default())
    }

    /// Returns the display name of the variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bug(_) => "Bug",
            Self::Feature(_) => "Feature",
        }
    }
}
