//! Content idea types.

use crate::ReviewState;
use serde::{Deserialize, Serialize};

/// Qualitative engagement-potential label assigned at ideation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EngagementPotential {
    /// Strong viral signals in the research
    High,
    /// Reasonable fit, no standout signal
    #[default]
    Medium,
    /// Niche or speculative
    Low,
}

/// A generated content idea.
///
/// Produced once per run; never mutated after creation except by an
/// explicit review action, which only sets the `review` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdea {
    /// Sequence id within the run, starting at 1
    pub id: u32,
    /// Compelling, hook-driven title
    pub title: String,
    /// Opening hook line
    #[serde(default)]
    pub hook: String,
    /// What the content covers
    pub concept: String,
    /// Main points to cover
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Why this idea will resonate
    #[serde(default)]
    pub rationale: String,
    /// Trending angle from the research that inspired it
    #[serde(default)]
    pub trending_angle: String,
    /// Qualitative engagement-potential label
    #[serde(default)]
    pub engagement_potential: EngagementPotential,
    /// Review state (only field mutated after creation)
    #[serde(default)]
    pub review: ReviewState,
}
