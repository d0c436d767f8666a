//! Pattern inference over a persona's reel history.
//!
//! Inference is a pure function of the history: it is recomputed wholesale
//! on every call rather than maintained incrementally, so a pattern set can
//! never drift out of sync with the reels it summarizes.

use chrono::{NaiveDate, Utc};
use reelsmith_core::{HookCategory, HookPattern, HookRanking, PatternSet, Persona, Reel};
use std::collections::HashMap;

/// How many top hooks to surface.
const TOP_HOOKS: usize = 5;
/// How many common topics to surface.
const TOP_TOPICS: usize = 10;
/// Title words this short carry no topical signal.
const MIN_TOPIC_WORD_LEN: usize = 4;

/// Derives a fresh [`PatternSet`] from the persona's history.
///
/// With an empty history the result carries only the learning-pass stamp.
///
/// # Examples
///
/// ```
/// use reelsmith_core::Persona;
/// use reelsmith_persona::learning::infer_patterns;
///
/// let persona = Persona::new("p", "Ava", "fitness", "beginners");
/// let patterns = infer_patterns(&persona);
/// assert!(patterns.auto_generated);
/// assert!(patterns.best_performing_hooks.is_empty());
/// ```
pub fn infer_patterns(persona: &Persona) -> PatternSet {
    let reels = &persona.existing_reels;
    if reels.is_empty() {
        return PatternSet {
            auto_generated: true,
            last_updated: Some(Utc::now()),
            ..PatternSet::default()
        };
    }

    let avg_script_length =
        reels.iter().map(|r| word_count(&r.script)).sum::<usize>() / reels.len();

    let mut scored: Vec<&Reel> = reels.iter().collect();
    scored.sort_by(|a, b| {
        b.engagement
            .score()
            .partial_cmp(&a.engagement.score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let best_performing_hooks = scored
        .iter()
        .take(TOP_HOOKS)
        .map(|r| HookPattern {
            hook: hook_of(&r.script),
            title: r.title.clone(),
            score: r.engagement.score(),
        })
        .collect();

    let rated: Vec<f64> = reels
        .iter()
        .filter(|r| r.engagement.views > 0)
        .map(|r| r.engagement.score())
        .collect();
    let avg_engagement_rate = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    PatternSet {
        auto_generated: true,
        last_updated: Some(Utc::now()),
        avg_script_length,
        best_performing_hooks,
        hook_rankings: rank_hook_styles(reels),
        common_topics: common_topics(reels),
        avg_engagement_rate,
    }
}

/// The hook of a script: its first sentence, terminator included.
pub fn hook_of(script: &str) -> String {
    let trimmed = script.trim();
    match trimmed.find(['.', '!', '?']) {
        Some(idx) => trimmed[..=idx].trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Buckets a hook into one of the fixed style categories.
///
/// Order matters: a question mark wins over a leading digit, a leading
/// digit over first-person phrasing, and everything else is a bold
/// statement.
pub fn classify_hook(hook: &str) -> HookCategory {
    let trimmed = hook.trim();
    if trimmed.ends_with('?') {
        return HookCategory::Question;
    }
    if trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return HookCategory::Statistic;
    }
    let first_word = trimmed
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_ascii_lowercase();
    if matches!(first_word.as_str(), "i" | "my" | "we") || first_word.starts_with("i'") {
        return HookCategory::Story;
    }
    HookCategory::BoldStatement
}

/// Ranks hook-style buckets by mean engagement, recency breaking ties.
///
/// On equal means, the bucket containing the more recently posted reel
/// ranks higher: newer evidence is the better guide.
fn rank_hook_styles(reels: &[Reel]) -> Vec<HookRanking> {
    let mut buckets: HashMap<HookCategory, (f64, usize, NaiveDate)> = HashMap::new();
    for reel in reels {
        let category = classify_hook(&hook_of(&reel.script));
        let entry = buckets
            .entry(category)
            .or_insert((0.0, 0, NaiveDate::MIN));
        entry.0 += reel.engagement.score();
        entry.1 += 1;
        entry.2 = entry.2.max(reel.posted_on);
    }

    let mut rankings: Vec<(HookRanking, NaiveDate)> = buckets
        .into_iter()
        .map(|(category, (total, count, newest))| {
            (
                HookRanking {
                    category,
                    mean_score: total / count as f64,
                    reel_count: count,
                },
                newest,
            )
        })
        .collect();

    rankings.sort_by(|(a, a_newest), (b, b_newest)| {
        b.mean_score
            .partial_cmp(&a.mean_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b_newest.cmp(a_newest))
    });

    rankings.into_iter().map(|(ranking, _)| ranking).collect()
}

/// Most frequent title words, longest-signal first.
///
/// Frequency descending, then alphabetical so equal counts order
/// deterministically.
fn common_topics(reels: &[Reel]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for reel in reels {
        for word in reel.title.split_whitespace() {
            let cleaned: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if cleaned.len() >= MIN_TOPIC_WORD_LEN {
                *counts.entry(cleaned).or_insert(0) += 1;
            }
        }
    }

    let mut topics: Vec<(String, usize)> = counts.into_iter().collect();
    topics.sort_by(|(a_word, a_count), (b_word, b_count)| {
        b_count.cmp(a_count).then(a_word.cmp(b_word))
    });
    topics
        .into_iter()
        .take(TOP_TOPICS)
        .map(|(word, _)| word)
        .collect()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
