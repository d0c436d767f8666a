//! Insight types: structured analytical findings usable as generation
//! context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of analytical finding an insight represents.
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
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InsightKind {
    /// A recurring audience frustration
    PainPoint,
    /// A rising topic
    Trend,
    /// An underserved content area
    ContentGap,
    /// A high-intent search keyword
    Keyword,
    /// A format or structure that drives engagement
    EngagementPattern,
}

/// A structured analytical finding.
///
/// Selected subsets are passed by value (kind and content) into a job's
/// parameters, capturing only what is needed to reproduce generation.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{Insight, InsightKind};
///
/// let insight = Insight::new(InsightKind::PainPoint, "Students freeze on timed sections");
/// assert_eq!(insight.kind, InsightKind::PainPoint);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Type tag
    pub kind: InsightKind,
    /// Text payload
    pub content: String,
}

impl Insight {
    /// Create a new insight.
    pub fn new(kind: InsightKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// One analysis pass over a persona's research, persisted per persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Persona the analysis ran for
    pub persona_id: String,
    /// Niche at analysis time
    pub niche: String,
    /// When the analysis completed
    pub generated_at: DateTime<Utc>,
    /// Distinct research platforms the analysis saw
    pub sources_analyzed: usize,
    /// The extracted findings
    pub insights: Vec<Insight>,
}

impl InsightReport {
    /// The findings of one kind, in report order.
    pub fn of_kind(&self, kind: InsightKind) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(move |i| i.kind == kind)
    }
}
