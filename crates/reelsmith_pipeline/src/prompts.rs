//! Prompt templates with file overrides.

use reelsmith_error::{PipelineError, PipelineErrorKind};
use std::path::PathBuf;
use tracing::debug;

/// The named templates the pipeline renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Batched idea generation (array response)
    IdeaGeneration,
    /// Script writing for one idea (object response)
    ScriptWriting,
    /// Visual direction for one scripted idea (object response)
    VisualSuggestions,
    /// Insight extraction from research (object response)
    InsightAnalysis,
}

impl PromptTemplate {
    /// Filename an override lives under in the prompts directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::IdeaGeneration => "idea_generation.txt",
            Self::ScriptWriting => "script_writing.txt",
            Self::VisualSuggestions => "visual_suggestions.txt",
            Self::InsightAnalysis => "insight_analysis.txt",
        }
    }

    fn default_text(&self) -> &'static str {
        match self {
            Self::IdeaGeneration => IDEA_GENERATION,
            Self::ScriptWriting => SCRIPT_WRITING,
            Self::VisualSuggestions => VISUAL_SUGGESTIONS,
            Self::InsightAnalysis => INSIGHT_ANALYSIS,
        }
    }
}

/// Named prompt templates with compiled-in defaults.
///
/// When a prompts directory is configured and holds a file named after the
/// template, that file's text is used instead of the default. Placeholders
/// are `{name}` and are substituted literally; placeholders the caller
/// does not supply are left as-is.
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    overrides_dir: Option<PathBuf>,
}

impl PromptLibrary {
    /// A library using only the compiled-in defaults.
    pub fn builtin() -> Self {
        Self {
            overrides_dir: None,
        }
    }

    /// A library that prefers per-template override files from `dir`.
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            overrides_dir: Some(dir.into()),
        }
    }

    /// Renders a template with the given placeholder substitutions.
    ///
    /// # Errors
    ///
    /// Fails only when an override file exists but cannot be read.
    pub fn render(
        &self,
        template: PromptTemplate,
        vars: &[(&str, &str)],
    ) -> Result<String, PipelineError> {
        let mut text = self.template_text(template)?;
        for (name, value) in vars {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        Ok(text)
    }

    fn template_text(&self, template: PromptTemplate) -> Result<String, PipelineError> {
        let Some(dir) = &self.overrides_dir else {
            return Ok(template.default_text().to_string());
        };
        let path = dir.join(template.file_name());
        if !path.exists() {
            return Ok(template.default_text().to_string());
        }
        debug!(path = %path.display(), "Using prompt override");
        std::fs::read_to_string(&path).map_err(|e| {
            PipelineError::new(PipelineErrorKind::PromptTemplate(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }
}

const IDEA_GENERATION: &str = "\
You are a short-form video strategist writing for the creator described below.

{persona}

## Current Research
{research}
{extra_context}
Generate exactly {count} reel ideas for this creator. Ground each idea in the
research above where possible and match the creator's style guide.

Output ONLY a valid JSON array. Each element must be an object with these
fields:
- \"title\": compelling, hook-driven title
- \"hook\": the opening line that stops the scroll
- \"concept\": what the content covers, 2-3 sentences
- \"key_points\": array of 3-5 main points
- \"rationale\": why this will resonate with the target audience
- \"trending_angle\": which research finding inspired it, or empty string
- \"engagement_potential\": \"high\", \"medium\", or \"low\"
";

const SCRIPT_WRITING: &str = "\
You are a short-form video scriptwriter working for the creator described
below.

{persona}

Write a complete reel script for this idea:

Title: {title}
Hook: {hook}
Concept: {concept}
Key points: {key_points}

Keep it speakable in 30-60 seconds. Open with the hook in the first 3
seconds, deliver the key points fast, close with a call to action in the
creator's CTA style.

Output ONLY a valid JSON object with these fields:
- \"title\": the reel title
- \"hook\": the spoken opening line
- \"main_content\": array of spoken lines, one per beat
- \"call_to_action\": the closing line
- \"full_script\": the complete script as one text block
- \"estimated_duration_seconds\": integer runtime estimate
";

const VISUAL_SUGGESTIONS: &str = "\
You are a short-form video art director working for the creator described
below.

{persona}

Suggest visual direction for this scripted reel:

Title: {title}
Script: {script}

Output ONLY a valid JSON object with these fields:
- \"b_roll\": array of footage cues
- \"text_overlays\": array of on-screen text moments
- \"animations\": array of animation cues
- \"color_scheme\": array of colors to lean on
- \"music_mood\": one-line music direction
- \"shot_list\": array of shots in order
";

const INSIGHT_ANALYSIS: &str = "\
You are an expert market researcher and content strategist.

Analyze this research for the \"{niche}\" niche targeting \"{target_audience}\"
and extract the strategic findings a short-form video creator can act on.

## Research
{research}

Output ONLY a valid JSON object with these fields, each an array of plain
strings (empty where the research shows nothing):
- \"trending_topics\": rising topics and why each is gaining traction
- \"pain_points\": audience frustrations or unmet needs
- \"content_gaps\": underserved topics worth covering
- \"keywords\": high-intent search phrases
- \"engagement_patterns\": formats or structures that drive engagement
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_with_substitution() {
        let library = PromptLibrary::builtin();
        let prompt = library
            .render(
                PromptTemplate::IdeaGeneration,
                &[
                    ("persona", "# Persona: Ava"),
                    ("research", "- nothing new"),
                    ("extra_context", ""),
                    ("count", "5"),
                ],
            )
            .unwrap();
        assert!(prompt.contains("# Persona: Ava"));
        assert!(prompt.contains("exactly 5 reel ideas"));
        assert!(!prompt.contains("{persona}"));
    }

    #[test]
    fn override_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("script_writing.txt"),
            "Custom template for {title}",
        )
        .unwrap();

        let library = PromptLibrary::with_overrides(dir.path());
        let prompt = library
            .render(PromptTemplate::ScriptWriting, &[("title", "My Reel")])
            .unwrap();
        assert_eq!(prompt, "Custom template for My Reel");
    }

    #[test]
    fn missing_override_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let library = PromptLibrary::with_overrides(dir.path());
        let prompt = library
            .render(PromptTemplate::VisualSuggestions, &[("persona", "x"), ("title", "t"), ("script", "s")])
            .unwrap();
        assert!(prompt.contains("art director"));
    }
}
