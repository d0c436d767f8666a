//! Staged run orchestration.

use crate::parse::{IdeaDraft, ScriptDraft, VisualDraft};
use crate::prompts::{PromptLibrary, PromptTemplate};
use crate::run_store::RunStore;
use chrono::Utc;
use reelsmith_core::{
    ContentIdea, ContentRun, Persona, ResearchBundle, Script, Stage, StageGap, VisualSuggestion,
};
use reelsmith_dispatch::{Dispatcher, GenerateParams, ResponseShape};
use reelsmith_error::{PipelineError, PipelineErrorKind, ReelsmithError};
use reelsmith_persona::{PersonaStore, style};
use reelsmith_research::ResearchAggregator;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How much research to quote per platform before the prompt bloats.
const RESEARCH_ITEMS_PER_PLATFORM: usize = 10;

/// Sampling temperatures per stage. Ideation and visuals run hot for
/// variety; scripting stays closer to the persona's voice.
const IDEATION_TEMPERATURE: f32 = 0.8;
const SCRIPTING_TEMPERATURE: f32 = 0.7;
const VISUALS_TEMPERATURE: f32 = 0.8;

/// Parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Persona to generate for
    pub persona_id: String,
    /// Number of ideas to request
    pub ideas_count: u32,
    /// Bypass research entirely (empty bundle, zero sources)
    pub skip_research: bool,
    /// Cache freshness window for research reuse
    pub max_research_age: Duration,
    /// Extra context folded into the ideation prompt
    pub extra_context: Option<String>,
    /// Whether to run the scripting stage
    pub generate_scripts: bool,
    /// Whether to run the visuals stage
    pub generate_visuals: bool,
}

impl RunRequest {
    /// A request with the default stage flags: research on with a
    /// six-hour freshness window, scripts and visuals both generated.
    pub fn new(persona_id: impl Into<String>, ideas_count: u32) -> Self {
        Self {
            persona_id: persona_id.into(),
            ideas_count,
            skip_research: false,
            max_research_age: Duration::from_secs(6 * 3600),
            extra_context: None,
            generate_scripts: true,
            generate_visuals: true,
        }
    }
}

/// Work already produced when a stage-fatal error ended a run.
#[derive(Debug, Clone, Default)]
pub struct PartialOutput {
    /// Ideas generated before the failure
    pub ideas: Vec<ContentIdea>,
    /// Scripts generated before the failure
    pub scripts: Vec<Script>,
    /// Visual suggestions generated before the failure
    pub visuals: Vec<VisualSuggestion>,
    /// The fully assembled run, present when only persistence failed
    pub run: Option<ContentRun>,
}

/// A stage-fatal pipeline failure.
///
/// Carries the work completed before the failing stage so callers can
/// salvage it; in particular an Output failure holds the complete
/// assembled run for a retry.
#[derive(Debug, derive_more::Display)]
#[display("Pipeline failed at {}: {}", stage, error)]
pub struct PipelineFailure {
    /// Stage where the run ended
    pub stage: Stage,
    /// The underlying error
    pub error: ReelsmithError,
    /// Work produced before the failure
    pub partial: PartialOutput,
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl PipelineFailure {
    fn at(stage: Stage, error: impl Into<ReelsmithError>) -> Self {
        Self {
            stage,
            error: error.into(),
            partial: PartialOutput::default(),
        }
    }

    fn with_partial(mut self, partial: PartialOutput) -> Self {
        self.partial = partial;
        self
    }
}

/// The staged generation pipeline.
///
/// Owns no state beyond its collaborators; every run is a fresh walk of
/// the stages.
pub struct ContentPipeline {
    dispatcher: Dispatcher,
    aggregator: ResearchAggregator,
    personas: PersonaStore,
    prompts: PromptLibrary,
    runs: RunStore,
}

impl std::fmt::Debug for ContentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentPipeline")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl ContentPipeline {
    /// Assembles a pipeline from its collaborators.
    pub fn new(
        dispatcher: Dispatcher,
        aggregator: ResearchAggregator,
        personas: PersonaStore,
        prompts: PromptLibrary,
        runs: RunStore,
    ) -> Self {
        Self {
            dispatcher,
            aggregator,
            personas,
            prompts,
            runs,
        }
    }

    /// The run store this pipeline persists into.
    pub fn run_store(&self) -> &RunStore {
        &self.runs
    }

    /// The persona store this pipeline reads from.
    pub fn persona_store(&self) -> &PersonaStore {
        &self.personas
    }

    /// Executes one full run.
    pub async fn run(&self, request: &RunRequest) -> Result<ContentRun, Box<PipelineFailure>> {
        self.run_with_observer(request, |_| {}).await
    }

    /// Executes one full run, reporting each stage as it completes.
    ///
    /// The observer fires exactly once per stage in order, including for
    /// stages the request flags skip, so callers tracking progress see
    /// every boundary.
    #[instrument(skip(self, request, on_stage), fields(persona_id = %request.persona_id, ideas = request.ideas_count))]
    pub async fn run_with_observer(
        &self,
        request: &RunRequest,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<ContentRun, Box<PipelineFailure>> {
        let started_at = Utc::now();

        let persona = self
            .personas
            .load(&request.persona_id)
            .await
            .map_err(|e| Box::new(PipelineFailure::at(Stage::Research, e)))?;

        // RESEARCH: best-effort, never fatal.
        let research = if request.skip_research {
            debug!("Skipping research stage");
            ResearchBundle::empty(&persona.basic_info.niche)
        } else {
            self.aggregator
                .get_research(&persona.basic_info.niche, request.max_research_age)
                .await
        };
        on_stage(Stage::Research);

        // IDEATION: one batched call; fatal on failure.
        let mut gaps: Vec<StageGap> = Vec::new();
        let ideas = self
            .ideation(&persona, &research, request, &mut gaps)
            .await
            .map_err(|e| Box::new(PipelineFailure::at(Stage::Ideation, e)))?;
        info!(ideas = ideas.len(), "Ideation complete");
        on_stage(Stage::Ideation);

        // SCRIPTING: per-idea isolation.
        let mut scripts: Vec<Script> = Vec::new();
        if request.generate_scripts {
            for idea in &ideas {
                match self.script_for_idea(&persona, idea).await {
                    Ok(script) => scripts.push(script),
                    Err(e) => {
                        warn!(idea_id = idea.id, error = %e, "Scripting failed for idea");
                        gaps.push(StageGap {
                            idea_id: idea.id,
                            stage: Stage::Scripting,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
        on_stage(Stage::Scripting);

        // VISUALS: per-idea isolation, scripted ideas only (all ideas when
        // the scripting stage was skipped).
        let mut visuals: Vec<VisualSuggestion> = Vec::new();
        if request.generate_visuals {
            for idea in &ideas {
                let script_text = if request.generate_scripts {
                    match scripts.iter().find(|s| s.idea_id == idea.id) {
                        Some(script) => script.full_script.clone(),
                        None => continue,
                    }
                } else {
                    idea.concept.clone()
                };
                match self.visuals_for_idea(&persona, idea, &script_text).await {
                    Ok(suggestion) => visuals.push(suggestion),
                    Err(e) => {
                        warn!(idea_id = idea.id, error = %e, "Visuals failed for idea");
                        gaps.push(StageGap {
                            idea_id: idea.id,
                            stage: Stage::Visuals,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
        on_stage(Stage::Visuals);

        // OUTPUT: assemble and persist.
        let finished_at = Utc::now();
        let mut run = ContentRun::empty(
            &request.persona_id,
            &persona.basic_info.niche,
            request.ideas_count,
        );
        run.date = started_at.date_naive();
        run.metadata.started_at = started_at;
        run.metadata.finished_at = finished_at;
        run.metadata.duration_seconds = (finished_at - started_at).num_milliseconds() as f64 / 1000.0;
        run.metadata.ideas_generated = ideas.len() as u32;
        run.metadata.scripts_generated = scripts.len() as u32;
        run.metadata.visuals_generated = visuals.len() as u32;
        run.metadata.research_sources_used = research.sources_used();
        run.research = research;
        run.ideas = ideas;
        run.scripts = scripts;
        run.visuals = visuals;
        run.gaps = gaps;

        if let Err(e) = self.runs.save(&run).await {
            return Err(Box::new(
                PipelineFailure::at(Stage::Output, e).with_partial(PartialOutput {
                    ideas: run.ideas.clone(),
                    scripts: run.scripts.clone(),
                    visuals: run.visuals.clone(),
                    run: Some(run),
                }),
            ));
        }
        on_stage(Stage::Output);

        info!(
            run_id = %run.run_id,
            ideas = run.ideas.len(),
            scripts = run.scripts.len(),
            visuals = run.visuals.len(),
            gaps = run.gaps.len(),
            "Run complete"
        );
        Ok(run)
    }

    /// One batched ideation call. Short or partially-unparseable arrays
    /// record gaps; an empty result is fatal.
    async fn ideation(
        &self,
        persona: &Persona,
        research: &ResearchBundle,
        request: &RunRequest,
        gaps: &mut Vec<StageGap>,
    ) -> Result<Vec<ContentIdea>, ReelsmithError> {
        let extra_context = match &request.extra_context {
            Some(context) => format!("\n## Additional Context\n{context}\n"),
            None => String::new(),
        };
        let prompt = self.prompts.render(
            PromptTemplate::IdeaGeneration,
            &[
                ("persona", &style::render_summary(persona)),
                ("research", &render_research(research)),
                ("extra_context", &extra_context),
                ("count", &request.ideas_count.to_string()),
            ],
        )?;

        let params = GenerateParams::builder()
            .prompt(prompt)
            .shape(ResponseShape::Array)
            .temperature(IDEATION_TEMPERATURE)
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::PromptTemplate(e.to_string())))?;

        let value = self.dispatcher.generate(&params).await.map_err(|e| {
            ReelsmithError::from(PipelineError::new(PipelineErrorKind::IdeationFailed(
                e.to_string(),
            )))
        })?;

        let items = value.as_array().cloned().unwrap_or_default();
        let returned = items.len().min(request.ideas_count as usize) as u32;
        let mut ideas = Vec::with_capacity(items.len());
        for (index, item) in items
            .into_iter()
            .take(request.ideas_count as usize)
            .enumerate()
        {
            let id = index as u32 + 1;
            match serde_json::from_value::<IdeaDraft>(item) {
                Ok(draft) => ideas.push(draft.into_idea(id)),
                Err(e) => {
                    warn!(idea_id = id, error = %e, "Dropping unparseable idea");
                    gaps.push(StageGap {
                        idea_id: id,
                        stage: Stage::Ideation,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // A short array is a partial failure: the absent ids get gap
        // records so the shortfall is visible in the persisted run.
        for id in returned + 1..=request.ideas_count {
            warn!(idea_id = id, "Provider returned fewer ideas than requested");
            gaps.push(StageGap {
                idea_id: id,
                stage: Stage::Ideation,
                reason: format!(
                    "provider returned {} of {} requested ideas",
                    returned, request.ideas_count
                ),
            });
        }

        if ideas.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoIdeas(format!(
                "requested {}, parsed none",
                request.ideas_count
            )))
            .into());
        }
        Ok(ideas)
    }

    async fn script_for_idea(
        &self,
        persona: &Persona,
        idea: &ContentIdea,
    ) -> Result<Script, ReelsmithError> {
        let prompt = self.prompts.render(
            PromptTemplate::ScriptWriting,
            &[
                ("persona", &style::render_summary(persona)),
                ("title", &idea.title),
                ("hook", &idea.hook),
                ("concept", &idea.concept),
                ("key_points", &idea.key_points.join("; ")),
            ],
        )?;
        let params = GenerateParams::builder()
            .prompt(prompt)
            .shape(ResponseShape::Object)
            .temperature(SCRIPTING_TEMPERATURE)
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::PromptTemplate(e.to_string())))?;

        let value = self.dispatcher.generate(&params).await?;
        let draft: ScriptDraft = serde_json::from_value(value).map_err(|e| {
            ReelsmithError::from(PipelineError::new(PipelineErrorKind::PromptTemplate(
                format!("script draft for idea {}: {}", idea.id, e),
            )))
        })?;
        Ok(draft.into_script(idea.id, &idea.title))
    }

    async fn visuals_for_idea(
        &self,
        persona: &Persona,
        idea: &ContentIdea,
        script_text: &str,
    ) -> Result<VisualSuggestion, ReelsmithError> {
        let prompt = self.prompts.render(
            PromptTemplate::VisualSuggestions,
            &[
                ("persona", &style::render_summary(persona)),
                ("title", &idea.title),
                ("script", script_text),
            ],
        )?;
        let params = GenerateParams::builder()
            .prompt(prompt)
            .shape(ResponseShape::Object)
            .temperature(VISUALS_TEMPERATURE)
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::PromptTemplate(e.to_string())))?;

        let value = self.dispatcher.generate(&params).await?;
        let draft: VisualDraft = serde_json::from_value(value).map_err(|e| {
            ReelsmithError::from(PipelineError::new(PipelineErrorKind::PromptTemplate(
                format!("visual draft for idea {}: {}", idea.id, e),
            )))
        })?;
        Ok(draft.into_visuals(idea.id))
    }
}

/// Renders a research bundle into markdown prompt context.
pub(crate) fn render_research(bundle: &ResearchBundle) -> String {
    if bundle.is_empty() {
        return "No current research available. Rely on the persona's niche \
                and learned patterns."
            .to_string();
    }

    let mut out = String::new();
    let mut platforms: Vec<_> = bundle.records.iter().map(|r| r.platform).collect();
    platforms.sort();
    platforms.dedup();

    for platform in platforms {
        out.push_str(&format!("### {platform}\n"));
        for record in bundle.records_for(platform).take(RESEARCH_ITEMS_PER_PLATFORM) {
            out.push_str(&format!("- {}\n", record.payload.title()));
        }
    }
    out
}
