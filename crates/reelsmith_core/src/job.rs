//! Background job types.

use crate::Insight;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of work a background job performs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobKind {
    /// Regenerate content from a curated insight subset
    InsightGeneration,
}

/// Input parameters captured at enqueue time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    /// Persona to generate for
    pub persona_id: String,
    /// Selected insights folded into the ideation prompt
    #[serde(default)]
    pub insights: Vec<Insight>,
    /// Number of ideas to request
    pub ideas_count: u32,
    /// Whether to run the scripting stage
    #[serde(default = "default_true")]
    pub generate_scripts: bool,
    /// Whether to run the visuals stage
    #[serde(default = "default_true")]
    pub generate_visuals: bool,
}

fn default_true() -> bool {
    true
}

/// Lifecycle state of a background job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for a worker
    Queued,
    /// Owned by a worker
    Running,
    /// Finished; `run_id` references the produced run
    Completed,
    /// Finished with an error; `error` holds the captured detail
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state. Terminal jobs are
    /// never resurrected; a retry creates a new job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A background job record.
///
/// Created on enqueue and mutated only by the worker executing it.
/// Readers receive immutable snapshot clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundJob {
    /// Unique job identifier
    pub job_id: Uuid,
    /// Kind of work
    pub kind: JobKind,
    /// Input parameters captured at enqueue time
    pub params: JobParams,
    /// Lifecycle state
    pub status: JobStatus,
    /// Coarse progress fraction in `[0.0, 1.0]`, advanced at stage
    /// boundaries
    pub progress: f32,
    /// Reference to the produced run, set on completion
    #[serde(default)]
    pub run_id: Option<Uuid>,
    /// Captured error detail, set on failure
    #[serde(default)]
    pub error: Option<String>,
    /// When the job was enqueued
    pub enqueued_at: DateTime<Utc>,
    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl BackgroundJob {
    /// A freshly queued job.
    pub fn queued(kind: JobKind, params: JobParams) -> Self {
        let now = Utc::now();
        Self {
            job_id: Uuid::new_v4(),
            kind,
            params,
            status: JobStatus::Queued,
            progress: 0.0,
            run_id: None,
            error: None,
            enqueued_at: now,
            updated_at: now,
        }
    }
}
