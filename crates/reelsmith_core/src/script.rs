//! Script types.

use crate::ReviewState;
use serde::{Deserialize, Serialize};

/// A full reel script generated for a content idea.
///
/// Always references an existing idea id within the same run. Same
/// non-destructive review semantics as `ContentIdea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Id of the idea this script was written for
    pub idea_id: u32,
    /// Script title (usually the idea title)
    pub title: String,
    /// Opening hook (first ~3 seconds)
    pub hook: String,
    /// Main content, one speakable line per entry
    #[serde(default)]
    pub main_content: Vec<String>,
    /// Closing call-to-action
    pub call_to_action: String,
    /// Complete script as a single text block
    pub full_script: String,
    /// Word count of the full script
    pub word_count: usize,
    /// Estimated runtime in seconds
    pub estimated_duration_seconds: u32,
    /// Review state (only field mutated after creation)
    #[serde(default)]
    pub review: ReviewState,
}
