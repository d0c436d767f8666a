//! The staged content-generation pipeline.
//!
//! One run walks `Research → Ideation → Scripting → Visuals → Output` for a
//! persona. Research is best-effort and ideation is one batched call; the
//! per-idea stages isolate failures so one bad completion costs one idea,
//! not the run. The assembled [`reelsmith_core::ContentRun`] is persisted
//! atomically, and stage-fatal errors surface as [`PipelineFailure`] values
//! that carry whatever work was already produced.
//!
//! [`InsightAnalyzer`] is a sibling operation: it distills a research
//! bundle into a persisted [`reelsmith_core::InsightReport`] whose
//! findings later seed generation jobs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod insight_store;
mod insights;
mod parse;
mod pipeline;
mod prompts;
mod run_store;

pub use insight_store::InsightStore;
pub use insights::InsightAnalyzer;
pub use parse::{IdeaDraft, InsightDraft, ScriptDraft, VisualDraft};
pub use pipeline::{ContentPipeline, PartialOutput, PipelineFailure, RunRequest};
pub use prompts::{PromptLibrary, PromptTemplate};
pub use run_store::{ReviewAction, ReviewTarget, RunStore};
