//! Visual suggestion types.

use crate::ReviewState;
use serde::{Deserialize, Serialize};

/// Visual direction generated for a scripted idea.
///
/// Always references an existing idea id within the same run. Same
/// non-destructive review semantics as `ContentIdea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSuggestion {
    /// Id of the idea this direction was produced for
    pub idea_id: u32,
    /// B-roll footage cues
    #[serde(default)]
    pub b_roll: Vec<String>,
    /// On-screen text overlays
    #[serde(default)]
    pub text_overlays: Vec<String>,
    /// Animation cues
    #[serde(default)]
    pub animations: Vec<String>,
    /// Color palette direction
    #[serde(default)]
    pub color_scheme: Vec<String>,
    /// Music mood suggestion
    #[serde(default)]
    pub music_mood: String,
    /// Shot-by-shot list
    #[serde(default)]
    pub shot_list: Vec<String>,
    /// Review state (only field mutated after creation)
    #[serde(default)]
    pub review: ReviewState,
}
