//! Core data types for the Reelsmith content engine.
//!
//! This crate provides the foundation data types used across the Reelsmith
//! workspace: personas and their learned patterns, research records, content
//! ideas, scripts, visual suggestions, content runs, insights, and
//! background jobs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod idea;
mod insight;
mod job;
mod persona;
mod research;
mod review;
mod run;
mod script;
mod stage;
mod visual;

pub use idea::{ContentIdea, EngagementPotential};
pub use insight::{Insight, InsightKind, InsightReport};
pub use job::{BackgroundJob, JobKind, JobParams, JobStatus};
pub use persona::{
    BasicInfo, EngagementMetrics, HookCategory, HookPattern, HookRanking, PatternSet, Persona,
    Reel, StyleGuide, VisualPreferences,
};
pub use research::{Platform, PlatformOutage, ResearchBundle, ResearchPayload, ResearchRecord};
pub use review::{ReviewState, ReviewStatus};
pub use run::{ContentRun, RunMetadata, StageGap};
pub use script::Script;
pub use stage::Stage;
pub use visual::VisualSuggestion;
