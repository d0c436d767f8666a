//! Wiring of configuration into a ready application.

use crate::config::ReelsmithConfig;
use reelsmith_dispatch::Dispatcher;
use reelsmith_error::ReelsmithResult;
use reelsmith_jobs::JobEngine;
use reelsmith_persona::PersonaStore;
use reelsmith_pipeline::{ContentPipeline, InsightAnalyzer, InsightStore, PromptLibrary, RunStore};
use reelsmith_research::{ResearchAggregator, ResearchCache, ResearchScraper};
use std::sync::Arc;
use tracing::info;

/// A fully wired application: pipeline plus job engine over shared
/// stores.
///
/// # Examples
///
/// ```no_run
/// use reelsmith::{Reelsmith, ReelsmithConfig};
///
/// # fn main() -> reelsmith::ReelsmithResult<()> {
/// let config = ReelsmithConfig::load(None)?;
/// let app = Reelsmith::from_config(&config, vec![])?;
/// let request = config.pipeline.run_request("sat_coach");
/// # let _ = (app, request);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Reelsmith {
    pipeline: Arc<ContentPipeline>,
    insights: InsightAnalyzer,
    jobs: JobEngine,
}

impl Reelsmith {
    /// Builds the application from configuration.
    ///
    /// Scrapers are passed in by the caller since research backends are
    /// pluggable; an empty list means runs proceed on persona context
    /// alone.
    pub fn from_config(
        config: &ReelsmithConfig,
        scrapers: Vec<Arc<dyn ResearchScraper>>,
    ) -> ReelsmithResult<Self> {
        let dispatcher = Dispatcher::from_config(&config.dispatch);
        let personas = PersonaStore::new(&config.storage.personas_dir)?;
        let cache = ResearchCache::new(&config.storage.research_cache_dir)?;
        let aggregator = ResearchAggregator::new(scrapers, cache);
        let runs = RunStore::new(&config.storage.runs_dir)?;
        let prompts = match &config.storage.prompts_dir {
            Some(dir) => PromptLibrary::with_overrides(dir),
            None => PromptLibrary::builtin(),
        };

        let insights = InsightAnalyzer::new(
            dispatcher.clone(),
            prompts.clone(),
            InsightStore::new(&config.storage.insights_dir)?,
        );
        let pipeline = Arc::new(ContentPipeline::new(
            dispatcher,
            aggregator,
            personas,
            prompts,
            runs,
        ));
        let jobs = JobEngine::new(Arc::clone(&pipeline));
        info!(
            providers = ?config.dispatch.ordered_providers().iter().map(|p| p.kind).collect::<Vec<_>>(),
            "Application wired"
        );
        Ok(Self {
            pipeline,
            insights,
            jobs,
        })
    }

    /// The shared content pipeline.
    pub fn pipeline(&self) -> &Arc<ContentPipeline> {
        &self.pipeline
    }

    /// The insight analyzer over the shared dispatcher.
    pub fn insights(&self) -> &InsightAnalyzer {
        &self.insights
    }

    /// The background job engine.
    pub fn jobs(&self) -> &JobEngine {
        &self.jobs
    }
}
