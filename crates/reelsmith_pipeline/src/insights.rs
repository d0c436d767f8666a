//! Prompt-driven insight extraction from research.

use crate::insight_store::InsightStore;
use crate::parse::InsightDraft;
use crate::pipeline::render_research;
use crate::prompts::{PromptLibrary, PromptTemplate};
use chrono::Utc;
use reelsmith_core::{InsightReport, Persona, ResearchBundle};
use reelsmith_dispatch::{Dispatcher, GenerateParams, ResponseShape};
use reelsmith_error::{PipelineError, PipelineErrorKind, ReelsmithResult};
use tracing::{info, instrument};

/// Analysis sampling temperature.
const ANALYSIS_TEMPERATURE: f32 = 0.7;
/// Completion cap; a full analysis answer fits well under this.
const ANALYSIS_MAX_TOKENS: u32 = 2000;

/// Extracts strategic findings from a research bundle.
///
/// One analysis is one dispatch call: the research is rendered into prompt
/// context, the model answers with grouped findings, and the parsed result
/// becomes an [`InsightReport`]. Reports are how insights come to exist;
/// selecting them into a background job's parameters is the consume side.
pub struct InsightAnalyzer {
    dispatcher: Dispatcher,
    prompts: PromptLibrary,
    store: InsightStore,
}

impl std::fmt::Debug for InsightAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightAnalyzer")
            .field("dispatcher", &self.dispatcher)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl InsightAnalyzer {
    /// Assembles an analyzer from its collaborators.
    pub fn new(dispatcher: Dispatcher, prompts: PromptLibrary, store: InsightStore) -> Self {
        Self {
            dispatcher,
            prompts,
            store,
        }
    }

    /// The store this analyzer persists into.
    pub fn store(&self) -> &InsightStore {
        &self.store
    }

    /// Runs one analysis pass and persists the resulting report.
    #[instrument(skip(self, persona, research), fields(persona_id = %persona.persona_id))]
    pub async fn analyze(
        &self,
        persona: &Persona,
        research: &ResearchBundle,
    ) -> ReelsmithResult<InsightReport> {
        let prompt = self.prompts.render(
            PromptTemplate::InsightAnalysis,
            &[
                ("niche", &persona.basic_info.niche),
                ("target_audience", &persona.basic_info.target_audience),
                ("research", &render_research(research)),
            ],
        )?;
        let params = GenerateParams::builder()
            .prompt(prompt)
            .shape(ResponseShape::Object)
            .temperature(ANALYSIS_TEMPERATURE)
            .max_tokens(ANALYSIS_MAX_TOKENS)
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::PromptTemplate(e.to_string())))?;

        let value = self.dispatcher.generate(&params).await?;
        let draft: InsightDraft = serde_json::from_value(value).map_err(|e| {
            PipelineError::new(PipelineErrorKind::InsightAnalysis(e.to_string()))
        })?;

        let report = InsightReport {
            persona_id: persona.persona_id.clone(),
            niche: persona.basic_info.niche.clone(),
            generated_at: Utc::now(),
            sources_analyzed: research.sources_used(),
            insights: draft.into_insights(),
        };
        self.store.save(&report).await?;
        info!(
            persona_id = %persona.persona_id,
            insights = report.insights.len(),
            "Insight analysis complete"
        );
        Ok(report)
    }
}
