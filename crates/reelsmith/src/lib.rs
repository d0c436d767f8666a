//! Reelsmith: LLM-driven short-video content generation.
//!
//! This facade crate wires the workspace together: persona management,
//! research aggregation, multi-provider dispatch, the staged generation
//! pipeline, and the background job engine. Most applications only need
//! this crate.
//!
//! ```no_run
//! use reelsmith::{Reelsmith, ReelsmithConfig};
//!
//! #[tokio::main]
//! async fn main() -> reelsmith::ReelsmithResult<()> {
//!     reelsmith::init_telemetry();
//!     let config = ReelsmithConfig::load(None)?;
//!     let app = Reelsmith::from_config(&config, vec![])?;
//!
//!     let request = config.pipeline.run_request("sat_coach");
//!     match app.pipeline().run(&request).await {
//!         Ok(run) => println!("generated {} ideas", run.ideas.len()),
//!         Err(failure) => eprintln!("run ended at {}: {}", failure.stage, failure.error),
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod telemetry;

pub use app::Reelsmith;
pub use config::{PipelineDefaults, ReelsmithConfig, StorageConfig};
pub use telemetry::init_telemetry;

// The workspace surface most callers need, re-exported.
pub use reelsmith_core::{
    BackgroundJob, ContentIdea, ContentRun, EngagementMetrics, Insight, InsightKind, InsightReport, JobKind,
    JobParams, JobStatus, Persona, Platform, ResearchBundle, ResearchRecord, ReviewStatus, Script,
    Stage, StageGap, VisualSuggestion,
};
pub use reelsmith_dispatch::{DispatchConfig, Dispatcher, GenerateParams, ProviderKind, ResponseShape};
pub use reelsmith_error::{ReelsmithError, ReelsmithErrorKind, ReelsmithResult};
pub use reelsmith_jobs::JobEngine;
pub use reelsmith_persona::PersonaStore;
pub use reelsmith_pipeline::{
    ContentPipeline, InsightAnalyzer, InsightStore, PipelineFailure, PromptLibrary, ReviewAction,
    ReviewTarget, RunRequest, RunStore,
};
pub use reelsmith_research::{ResearchAggregator, ResearchCache, ResearchScraper};
