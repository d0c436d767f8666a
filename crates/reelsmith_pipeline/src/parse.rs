//! Draft types bridging LLM output to the core model.
//!
//! Providers drift on field naming even with a schema in the prompt, so
//! each draft carries serde aliases for the variants seen in practice and
//! fills defaults for omitted optional fields. Conversion into core types
//! computes the derived fields.

use reelsmith_core::{
    ContentIdea, EngagementPotential, Insight, InsightKind, ReviewState, Script, VisualSuggestion,
};
use serde::Deserialize;

/// One idea as the model returned it.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaDraft {
    /// Idea title
    pub title: String,
    /// Opening hook
    #[serde(default, alias = "opening_hook")]
    pub hook: String,
    /// What the content covers
    #[serde(alias = "description")]
    pub concept: String,
    /// Main points
    #[serde(default, alias = "points")]
    pub key_points: Vec<String>,
    /// Why it will resonate
    #[serde(default, alias = "why_it_works")]
    pub rationale: String,
    /// Research finding it leans on
    #[serde(default)]
    pub trending_angle: String,
    /// Free-text potential label; parsed leniently
    #[serde(default)]
    pub engagement_potential: Option<String>,
}

impl IdeaDraft {
    /// Converts the draft into a [`ContentIdea`] with the given sequence id.
    ///
    /// An unrecognized potential label falls back to `Medium` rather than
    /// dropping the idea.
    pub fn into_idea(self, id: u32) -> ContentIdea {
        let engagement_potential = self
            .engagement_potential
            .as_deref()
            .and_then(|label| label.trim().parse::<EngagementPotential>().ok())
            .unwrap_or_default();
        ContentIdea {
            id,
            title: self.title,
            hook: self.hook,
            concept: self.concept,
            key_points: self.key_points,
            rationale: self.rationale,
            trending_angle: self.trending_angle,
            engagement_potential,
            review: ReviewState::default(),
        }
    }
}

/// One script as the model returned it.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptDraft {
    /// Script title; the idea title fills in when omitted
    #[serde(default)]
    pub title: Option<String>,
    /// Spoken opening line
    pub hook: String,
    /// Spoken lines, one per beat
    #[serde(default, alias = "content")]
    pub main_content: Vec<String>,
    /// Closing line
    #[serde(alias = "cta")]
    pub call_to_action: String,
    /// Complete script; composed from the parts when omitted
    #[serde(default)]
    pub full_script: Option<String>,
    /// Runtime estimate
    #[serde(default = "default_duration", alias = "estimated_duration")]
    pub estimated_duration_seconds: u32,
}

fn default_duration() -> u32 {
    30
}

impl ScriptDraft {
    /// Converts the draft into a [`Script`] for the given idea.
    ///
    /// The word count is always computed from the final full script, never
    /// trusted from the model.
    pub fn into_script(self, idea_id: u32, idea_title: &str) -> Script {
        let full_script = self.full_script.unwrap_or_else(|| {
            let mut parts = Vec::with_capacity(self.main_content.len() + 2);
            parts.push(self.hook.clone());
            parts.extend(self.main_content.iter().cloned());
            parts.push(self.call_to_action.clone());
            parts.join(" ")
        });
        let word_count = full_script.split_whitespace().count();
        Script {
            idea_id,
            title: self.title.unwrap_or_else(|| idea_title.to_string()),
            hook: self.hook,
            main_content: self.main_content,
            call_to_action: self.call_to_action,
            full_script,
            word_count,
            estimated_duration_seconds: self.estimated_duration_seconds,
            review: ReviewState::default(),
        }
    }
}

/// One visual-direction block as the model returned it.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualDraft {
    /// Footage cues
    #[serde(default, alias = "broll")]
    pub b_roll: Vec<String>,
    /// On-screen text moments
    #[serde(default, alias = "overlays")]
    pub text_overlays: Vec<String>,
    /// Animation cues
    #[serde(default)]
    pub animations: Vec<String>,
    /// Palette direction
    #[serde(default, alias = "colors")]
    pub color_scheme: Vec<String>,
    /// Music direction
    #[serde(default)]
    pub music_mood: String,
    /// Shots in order
    #[serde(default)]
    pub shot_list: Vec<String>,
}

impl VisualDraft {
    /// Converts the draft into a [`VisualSuggestion`] for the given idea.
    pub fn into_visuals(self, idea_id: u32) -> VisualSuggestion {
        VisualSuggestion {
            idea_id,
            b_roll: self.b_roll,
            text_overlays: self.text_overlays,
            animations: self.animations,
            color_scheme: self.color_scheme,
            music_mood: self.music_mood,
            shot_list: self.shot_list,
            review: ReviewState::default(),
        }
    }
}

/// One insight-analysis response as the model returned it.
///
/// Each field matches one [`InsightKind`]; a field the model omits stands
/// for "nothing found", not a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightDraft {
    /// Rising topics
    #[serde(default, alias = "trends")]
    pub trending_topics: Vec<String>,
    /// Audience frustrations or unmet needs
    #[serde(default, alias = "audience_pain_points")]
    pub pain_points: Vec<String>,
    /// Underserved topics worth covering
    #[serde(default, alias = "gaps")]
    pub content_gaps: Vec<String>,
    /// High-intent search phrases
    #[serde(default, alias = "keyword_opportunities")]
    pub keywords: Vec<String>,
    /// Formats or structures that drive engagement
    #[serde(default)]
    pub engagement_patterns: Vec<String>,
}

impl InsightDraft {
    /// Flattens the draft into typed insights, kinds in a fixed order.
    pub fn into_insights(self) -> Vec<Insight> {
        let mut insights = Vec::new();
        let groups = [
            (InsightKind::Trend, self.trending_topics),
            (InsightKind::PainPoint, self.pain_points),
            (InsightKind::ContentGap, self.content_gaps),
            (InsightKind::Keyword, self.keywords),
            (InsightKind::EngagementPattern, self.engagement_patterns),
        ];
        for (kind, contents) in groups {
            insights.extend(
                contents
                    .into_iter()
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| Insight::new(kind, c)),
            );
        }
        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_draft_accepts_field_variants() {
        let json = r#"{
            "title": "Morning myths",
            "opening_hook": "Did you know?",
            "description": "Debunks three myths.",
            "why_it_works": "Contrarian takes perform.",
            "engagement_potential": "High"
        }"#;
        let draft: IdeaDraft = serde_json::from_str(json).unwrap();
        let idea = draft.into_idea(1);
        assert_eq!(idea.id, 1);
        assert_eq!(idea.hook, "Did you know?");
        assert_eq!(idea.concept, "Debunks three myths.");
        assert_eq!(idea.engagement_potential, EngagementPotential::High);
    }

    #[test]
    fn unknown_potential_label_defaults_to_medium() {
        let json = r#"{"title": "t", "concept": "c", "engagement_potential": "viral!!"}"#;
        let draft: IdeaDraft = serde_json::from_str(json).unwrap();
        assert_eq!(
            draft.into_idea(1).engagement_potential,
            EngagementPotential::Medium
        );
    }

    #[test]
    fn insight_draft_flattens_present_fields_only() {
        let json = r#"{
            "trends": ["10-second study hacks"],
            "pain_points": ["score plateaus", "  "],
            "keywords": ["sat timing strategy"]
        }"#;
        let draft: InsightDraft = serde_json::from_str(json).unwrap();
        let insights = draft.into_insights();
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].kind, InsightKind::Trend);
        assert_eq!(insights[1].kind, InsightKind::PainPoint);
        assert_eq!(insights[2].kind, InsightKind::Keyword);
        assert_eq!(insights[2].content, "sat timing strategy");
    }

    #[test]
    fn script_draft_composes_missing_full_script() {
        let json = r#"{
            "hook": "Stop doing this.",
            "content": ["First beat.", "Second beat."],
            "cta": "Save this for later."
        }"#;
        let draft: ScriptDraft = serde_json::from_str(json).unwrap();
        let script = draft.into_script(2, "Fallback title");
        assert_eq!(script.title, "Fallback title");
        assert_eq!(
            script.full_script,
            "Stop doing this. First beat. Second beat. Save this for later."
        );
        assert_eq!(script.word_count, 11);
        assert_eq!(script.estimated_duration_seconds, 30);
    }

    #[test]
    fn script_word_count_is_computed_not_trusted() {
        let json = r#"{
            "hook": "h",
            "call_to_action": "c",
            "full_script": "one two three four"
        }"#;
        let draft: ScriptDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.into_script(1, "t").word_count, 4);
    }

    #[test]
    fn visual_draft_fills_defaults() {
        let json = r#"{"b_roll": ["desk shot"], "music_mood": "upbeat"}"#;
        let draft: VisualDraft = serde_json::from_str(json).unwrap();
        let visuals = draft.into_visuals(3);
        assert_eq!(visuals.idea_id, 3);
        assert!(visuals.shot_list.is_empty());
        assert_eq!(visuals.music_mood, "upbeat");
    }
}
