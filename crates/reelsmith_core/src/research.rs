//! Research record types produced by platform scrapers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of research platforms.
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    /// Reddit forum posts
    Reddit,
    /// News headlines
    News,
    /// Instagram hashtag posts
    Instagram,
    /// YouTube videos
    Youtube,
    /// Web search results
    WebSearch,
}

/// Source-specific raw fields of a research record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResearchPayload {
    /// A Reddit post
    Reddit {
        /// Post title
        title: String,
        /// Subreddit name without the r/ prefix
        subreddit: String,
        /// Upvote score
        score: i64,
        /// Comment count
        comments: u64,
    },
    /// A news item
    News {
        /// Headline
        headline: String,
        /// Publishing outlet
        outlet: String,
        /// Article summary
        summary: String,
    },
    /// An Instagram post found under a hashtag
    Instagram {
        /// Post caption (possibly truncated)
        caption: String,
        /// Hashtag it was found under, without the # prefix
        hashtag: String,
        /// Like count
        likes: u64,
        /// View count
        views: u64,
    },
    /// A YouTube video
    Youtube {
        /// Video title
        title: String,
        /// Channel name
        channel: String,
        /// View count
        views: u64,
        /// Like count
        likes: u64,
    },
    /// A web search result
    WebSearch {
        /// Result title
        title: String,
        /// Result snippet
        snippet: String,
        /// Source domain
        domain: String,
    },
}

impl ResearchPayload {
    /// The headline-equivalent of this payload, used when rendering
    /// research into prompt context.
    pub fn title(&self) -> &str {
        match self {
            Self::Reddit { title, .. } => title,
            Self::News { headline, .. } => headline,
            Self::Instagram { caption, .. } => caption,
            Self::Youtube { title, .. } => title,
            Self::WebSearch { title, .. } => title,
        }
    }
}

/// One item of fetched research. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    /// Platform the record came from
    pub platform: Platform,
    /// Niche it was fetched for
    pub niche: String,
    /// Source-specific raw fields
    pub payload: ResearchPayload,
    /// When the record was fetched
    pub fetched_at: DateTime<Utc>,
}

/// A platform that could not be reached during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformOutage {
    /// The unavailable platform
    pub platform: Platform,
    /// Human-readable failure reason
    pub reason: String,
}

/// The merged research snapshot a pipeline run consumes.
///
/// Research is best-effort: an empty bundle is valid, and downstream
/// stages treat missing research as reduced context, not a fatal
/// condition.
///
/// # Examples
///
/// ```
/// use reelsmith_core::ResearchBundle;
///
/// let bundle = ResearchBundle::empty("SAT Exam Preparation");
/// assert!(bundle.is_empty());
/// assert_eq!(bundle.sources_used(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchBundle {
    /// Niche the bundle was assembled for
    pub niche: String,
    /// All records, across platforms
    #[serde(default)]
    pub records: Vec<ResearchRecord>,
    /// Platforms that failed during aggregation
    #[serde(default)]
    pub unavailable: Vec<PlatformOutage>,
    /// When the bundle was assembled
    pub fetched_at: DateTime<Utc>,
}

impl ResearchBundle {
    /// An empty bundle for the given niche.
    pub fn empty(niche: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            records: Vec::new(),
            unavailable: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Whether the bundle holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct platforms that contributed records.
    pub fn sources_used(&self) -> usize {
        let mut platforms: Vec<Platform> = self.records.iter().map(|r| r.platform).collect();
        platforms.sort();
        platforms.dedup();
        platforms.len()
    }

    /// Records contributed by a single platform.
    pub fn records_for(&self, platform: Platform) -> impl Iterator<Item = &ResearchRecord> {
        self.records.iter().filter(move |r| r.platform == platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(platform: Platform) -> ResearchRecord {
        ResearchRecord {
            platform,
            niche: "test".to_string(),
            payload: ResearchPayload::News {
                headline: "h".to_string(),
                outlet: "o".to_string(),
                summary: "s".to_string(),
            },
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn sources_used_counts_distinct_platforms() {
        let mut bundle = ResearchBundle::empty("test");
        bundle.records.push(record(Platform::Reddit));
        bundle.records.push(record(Platform::Reddit));
        bundle.records.push(record(Platform::News));
        assert_eq!(bundle.sources_used(), 2);
    }
}
