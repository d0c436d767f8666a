//! Deterministic style briefing for prompts.

use reelsmith_core::Persona;
use std::fmt::Write;

/// How many best-performing hooks the briefing quotes.
const SUMMARY_HOOKS: usize = 3;

/// Renders a persona into a markdown briefing for prompt context.
///
/// The output is a pure function of the persona state: the same persona
/// always renders byte-identically, and the summary only changes after a
/// reel is added or the style guide is edited.
///
/// # Examples
///
/// ```
/// use reelsmith_core::Persona;
/// use reelsmith_persona::style::render_summary;
///
/// let persona = Persona::new("sat_coach", "Ava", "SAT Exam Preparation", "High school juniors");
/// let summary = render_summary(&persona);
/// assert!(summary.contains("## Style Guide"));
/// assert_eq!(summary, render_summary(&persona));
/// ```
pub fn render_summary(persona: &Persona) -> String {
    let mut out = String::new();
    let info = &persona.basic_info;
    let style = &persona.style_guide;

    // Infallible writes into a String; the pattern keeps formatting terse.
    let _ = writeln!(out, "# Persona: {}", info.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "## Basic Info");
    let _ = writeln!(out, "- Niche: {}", info.niche);
    let _ = writeln!(out, "- Target audience: {}", info.target_audience);
    let _ = writeln!(out, "- Tone: {}", info.tone);
    if !info.unique_angle.is_empty() {
        let _ = writeln!(out, "- Unique angle: {}", info.unique_angle);
    }
    if !info.hashtags.is_empty() {
        let _ = writeln!(out, "- Hashtags: {}", info.hashtags.join(" "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Style Guide");
    let _ = writeln!(out, "- Hook style: {}", style.hook_style);
    let _ = writeln!(out, "- Content style: {}", style.content_style);
    let _ = writeln!(out, "- CTA style: {}", style.cta_style);
    if !style.avoid.is_empty() {
        let _ = writeln!(out, "- Avoid: {}", style.avoid.join(", "));
    }
    if !style.visual_preferences.colors.is_empty() {
        let _ = writeln!(
            out,
            "- Colors: {}",
            style.visual_preferences.colors.join(", ")
        );
    }
    let _ = writeln!(out, "- Visual style: {}", style.visual_preferences.style);

    let patterns = &persona.learned_patterns;
    if patterns.auto_generated && !persona.existing_reels.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## Learned Patterns");
        let _ = writeln!(
            out,
            "- Average script length: {} words",
            patterns.avg_script_length
        );
        if let Some(rate) = patterns.avg_engagement_rate {
            let _ = writeln!(out, "- Average engagement rate: {:.3}", rate);
        }
        if !patterns.hook_rankings.is_empty() {
            let ranked: Vec<String> = patterns
                .hook_rankings
                .iter()
                .map(|r| format!("{} ({:.3})", r.category, r.mean_score))
                .collect();
            let _ = writeln!(out, "- Hook styles by performance: {}", ranked.join(", "));
        }
        if !patterns.common_topics.is_empty() {
            let _ = writeln!(out, "- Common topics: {}", patterns.common_topics.join(", "));
        }
    }

    if !patterns.best_performing_hooks.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## Best Performing Hooks");
        for (i, hook) in patterns
            .best_performing_hooks
            .iter()
            .take(SUMMARY_HOOKS)
            .enumerate()
        {
            let _ = writeln!(
                out,
                "{}. \"{}\" ({:.3}) from \"{}\"",
                i + 1,
                hook.hook,
                hook.score,
                hook.title
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::infer_patterns;
    use chrono::NaiveDate;
    use reelsmith_core::{EngagementMetrics, Reel};

    #[test]
    fn summary_is_deterministic() {
        let mut persona = Persona::new("p", "Ava", "fitness", "beginners");
        persona.existing_reels.push(Reel {
            id: "reel_001".to_string(),
            title: "Morning routine myths".to_string(),
            script: "Did you know? Most routines fail.".to_string(),
            engagement: EngagementMetrics {
                views: 1000,
                likes: 80,
                ..Default::default()
            },
            posted_on: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            performance_notes: String::new(),
        });
        persona.learned_patterns = infer_patterns(&persona);

        let first = render_summary(&persona);
        let second = render_summary(&persona);
        assert_eq!(first, second);
        assert!(first.contains("## Learned Patterns"));
        assert!(first.contains("## Best Performing Hooks"));
        assert!(first.contains("Did you know?"));
    }

    #[test]
    fn summary_quotes_at_most_three_hooks() {
        let mut persona = Persona::new("p", "Ava", "fitness", "beginners");
        for i in 0..6u64 {
            persona.existing_reels.push(Reel {
                id: format!("reel_{i:03}"),
                title: format!("Title {i}"),
                script: "Hook here. Body.".to_string(),
                engagement: EngagementMetrics {
                    views: 100,
                    likes: i * 5,
                    ..Default::default()
                },
                posted_on: NaiveDate::from_ymd_opt(2026, 1, (i + 1) as u32).unwrap(),
                performance_notes: String::new(),
            });
        }
        persona.learned_patterns = infer_patterns(&persona);

        let summary = render_summary(&persona);
        assert!(summary.contains("3. "));
        assert!(!summary.contains("4. "));
    }
}
