//! Pipeline stage identifiers.

use serde::{Deserialize, Serialize};

/// One phase of the generation pipeline.
///
/// The pipeline advances `Research → Ideation → Scripting → Visuals →
/// Output`. Ideation and Output failures are fatal to a run; Scripting and
/// Visuals failures are isolated per idea.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Best-effort research aggregation
    Research,
    /// One batched call producing all ideas
    Ideation,
    /// One call per idea writing a script
    Scripting,
    /// One call per scripted idea producing visual direction
    Visuals,
    /// Run assembly and atomic persistence
    Output,
}
