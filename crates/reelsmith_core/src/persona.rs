//! Persona types: creator profile, style guide, reel history, and learned
//! patterns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A named creator profile that steers content generation.
///
/// Owned exclusively by the persona store. `existing_reels` is append-only:
/// history entries are never removed or rewritten, only added via
/// `add_reel`. `learned_patterns` is recomputed wholesale from history and
/// overwritten on each learning pass.
///
/// # Examples
///
/// ```
/// use reelsmith_core::Persona;
///
/// let persona = Persona::new("sat_coach", "Ava", "SAT Exam Preparation", "High school juniors");
/// assert_eq!(persona.persona_id, "sat_coach");
/// assert!(persona.existing_reels.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique identifier, doubles as the persisted filename stem
    pub persona_id: String,
    /// Display name, niche, audience, and tone
    pub basic_info: BasicInfo,
    /// Hook/content/CTA conventions and the avoid-list
    pub style_guide: StyleGuide,
    /// Ordered history of published reels (append-only)
    #[serde(default)]
    pub existing_reels: Vec<Reel>,
    /// Patterns inferred from history (overwritten wholesale on recompute)
    #[serde(default)]
    pub learned_patterns: PatternSet,
}

impl Persona {
    /// Create a persona with the default style-guide structure.
    pub fn new(
        persona_id: impl Into<String>,
        name: impl Into<String>,
        niche: impl Into<String>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            persona_id: persona_id.into(),
            basic_info: BasicInfo {
                name: name.into(),
                niche: niche.into(),
                target_audience: target_audience.into(),
                tone: "Friendly and engaging".to_string(),
                unique_angle: String::new(),
                hashtags: Vec::new(),
                posting_frequency: "daily".to_string(),
            },
            style_guide: StyleGuide::default(),
            existing_reels: Vec::new(),
            learned_patterns: PatternSet::default(),
        }
    }
}

/// Basic profile fields for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Display name
    pub name: String,
    /// Content niche (e.g. "SAT Exam Preparation")
    pub niche: String,
    /// Target audience description
    pub target_audience: String,
    /// Content tone
    pub tone: String,
    /// What sets this creator apart
    #[serde(default)]
    pub unique_angle: String,
    /// Preferred hashtags
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Posting cadence (informational)
    #[serde(default)]
    pub posting_frequency: String,
}

/// Stylistic conventions a persona's content follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGuide {
    /// How openings grab attention
    pub hook_style: String,
    /// How the body delivers value
    pub content_style: String,
    /// How calls-to-action are phrased
    pub cta_style: String,
    /// Topics and phrasings to avoid
    #[serde(default)]
    pub avoid: Vec<String>,
    /// Visual direction preferences
    #[serde(default)]
    pub visual_preferences: VisualPreferences,
}

impl Default for StyleGuide {
    fn default() -> Self {
        Self {
            hook_style: "Question or bold statement".to_string(),
            content_style: "Fast-paced, value-packed".to_string(),
            cta_style: "Save and share focused".to_string(),
            avoid: Vec::new(),
            visual_preferences: VisualPreferences::default(),
        }
    }
}

/// Visual direction preferences for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPreferences {
    /// Preferred color palette
    #[serde(default)]
    pub colors: Vec<String>,
    /// Overall visual style
    pub style: String,
    /// On-screen text style
    pub text_style: String,
}

impl Default for VisualPreferences {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            style: "Clean and modern".to_string(),
            text_style: "Bold and readable".to_string(),
        }
    }
}

/// A published reel in a persona's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reel {
    /// Sequential identifier within the persona (e.g. "reel_003")
    pub id: String,
    /// Reel title
    pub title: String,
    /// Full script text
    pub script: String,
    /// Engagement metrics at last update
    #[serde(default)]
    pub engagement: EngagementMetrics,
    /// Date of posting
    pub posted_on: NaiveDate,
    /// Free-form performance notes
    #[serde(default)]
    pub performance_notes: String,
}

/// Engagement counters for a reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// View count
    #[serde(default)]
    pub views: u64,
    /// Like count
    #[serde(default)]
    pub likes: u64,
    /// Comment count
    #[serde(default)]
    pub comments: u64,
    /// Share count
    #[serde(default)]
    pub shares: u64,
    /// Save count
    #[serde(default)]
    pub saves: u64,
}

impl EngagementMetrics {
    /// Weighted engagement rate: saves and shares count triple, comments
    /// double, normalized by views. Zero when the reel has no views.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::EngagementMetrics;
    ///
    /// let eng = EngagementMetrics { views: 100, likes: 10, comments: 5, shares: 2, saves: 3 };
    /// assert!((eng.score() - 0.35).abs() < 1e-9);
    /// ```
    pub fn score(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        let weighted =
            self.likes as f64 + 2.0 * self.comments as f64 + 3.0 * (self.shares + self.saves) as f64;
        weighted / self.views as f64
    }
}

/// Hook-style categories used to bucket past reels during pattern
/// inference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HookCategory {
    /// Opens with a question
    Question,
    /// Opens with a number or statistic
    Statistic,
    /// Opens with a first-person anecdote
    Story,
    /// Opens with a declarative claim
    BoldStatement,
}

/// A top-performing hook surfaced during pattern inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookPattern {
    /// The hook text (first sentence of the script)
    pub hook: String,
    /// Title of the reel it came from
    pub title: String,
    /// Engagement score of that reel
    pub score: f64,
}

/// A ranked hook-style bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookRanking {
    /// The hook-style category
    pub category: HookCategory,
    /// Mean engagement score across reels in this bucket
    pub mean_score: f64,
    /// Number of reels in this bucket
    pub reel_count: usize,
}

/// Patterns derived from a persona's reel history.
///
/// Recomputed from history on each learning pass rather than incrementally
/// maintained, so it is always consistent with the latest history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternSet {
    /// Whether this set was produced by the learning pass (as opposed to
    /// hand-edited)
    #[serde(default)]
    pub auto_generated: bool,
    /// When the learning pass last ran
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Mean script length in words
    #[serde(default)]
    pub avg_script_length: usize,
    /// Top hooks by engagement score
    #[serde(default)]
    pub best_performing_hooks: Vec<HookPattern>,
    /// Hook-style buckets ranked by mean engagement
    #[serde(default)]
    pub hook_rankings: Vec<HookRanking>,
    /// Most frequent title words
    #[serde(default)]
    pub common_topics: Vec<String>,
    /// Mean engagement rate across reels with views
    #[serde(default)]
    pub avg_engagement_rate: Option<f64>,
}
