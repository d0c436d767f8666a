//! Content run: the aggregate root of one pipeline execution.

use crate::{ContentIdea, ResearchBundle, Script, Stage, VisualSuggestion};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A per-item failure recorded during scripting or visuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageGap {
    /// Id of the idea that failed
    pub idea_id: u32,
    /// Stage where the failure occurred
    pub stage: Stage,
    /// Human-readable failure reason
    pub reason: String,
}

/// Timing and count metadata for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// When the pipeline started
    pub started_at: DateTime<Utc>,
    /// When the pipeline finished
    pub finished_at: DateTime<Utc>,
    /// Total duration in seconds
    pub duration_seconds: f64,
    /// Ideas the caller asked for
    pub ideas_requested: u32,
    /// Ideas actually produced
    pub ideas_generated: u32,
    /// Scripts actually produced
    pub scripts_generated: u32,
    /// Visual suggestions actually produced
    pub visuals_generated: u32,
    /// Distinct research platforms that contributed records
    pub research_sources_used: usize,
}

/// One execution's full output bundle.
///
/// Created atomically at the end of a pipeline execution and treated as
/// append-only afterwards: review actions update item-level `ReviewState`
/// fields inside it, never remove items. A partially-successful run is
/// still persisted, with its gaps recorded.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{ContentRun, ResearchBundle};
/// use chrono::Utc;
///
/// let run = ContentRun::empty("sat_coach", "SAT Exam Preparation", 5);
/// assert_eq!(run.ideas.len(), 0);
/// assert_eq!(run.metadata.ideas_requested, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRun {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Date the run was produced
    pub date: NaiveDate,
    /// Persona the run was generated for
    pub persona_id: String,
    /// Niche at generation time
    pub niche: String,
    /// Research snapshot the run consumed
    pub research: ResearchBundle,
    /// Generated ideas
    #[serde(default)]
    pub ideas: Vec<ContentIdea>,
    /// Generated scripts, each referencing an idea id in this run
    #[serde(default)]
    pub scripts: Vec<Script>,
    /// Generated visual suggestions, each referencing an idea id in this run
    #[serde(default)]
    pub visuals: Vec<VisualSuggestion>,
    /// Per-item failures recorded during scripting/visuals
    #[serde(default)]
    pub gaps: Vec<StageGap>,
    /// Timing and count metadata
    pub metadata: RunMetadata,
}

impl ContentRun {
    /// An empty run shell, used as the assembly target during a pipeline
    /// execution.
    pub fn empty(persona_id: impl Into<String>, niche: impl Into<String>, requested: u32) -> Self {
        let now = Utc::now();
        let niche = niche.into();
        Self {
            run_id: Uuid::new_v4(),
            date: now.date_naive(),
            persona_id: persona_id.into(),
            niche: niche.clone(),
            research: ResearchBundle::empty(niche),
            ideas: Vec::new(),
            scripts: Vec::new(),
            visuals: Vec::new(),
            gaps: Vec::new(),
            metadata: RunMetadata {
                started_at: now,
                finished_at: now,
                duration_seconds: 0.0,
                ideas_requested: requested,
                ideas_generated: 0,
                scripts_generated: 0,
                visuals_generated: 0,
                research_sources_used: 0,
            },
        }
    }

    /// Look up an idea by its sequence id.
    pub fn idea(&self, idea_id: u32) -> Option<&ContentIdea> {
        self.ideas.iter().find(|i| i.id == idea_id)
    }

    /// Look up the script for an idea.
    pub fn script_for(&self, idea_id: u32) -> Option<&Script> {
        self.scripts.iter().find(|s| s.idea_id == idea_id)
    }

    /// Look up the visual suggestion for an idea.
    pub fn visuals_for(&self, idea_id: u32) -> Option<&VisualSuggestion> {
        self.visuals.iter().find(|v| v.idea_id == idea_id)
    }
}
