//! Shared fixtures for pipeline integration tests.

pub mod mock_provider;

use async_trait::async_trait;
use chrono::Utc;
use mock_provider::ScriptedProvider;
use reelsmith_core::{Platform, ResearchPayload, ResearchRecord};
use reelsmith_dispatch::{Dispatcher, ProviderClient, RetryPolicy};
use reelsmith_error::{ResearchError, ResearchErrorKind};
use reelsmith_persona::PersonaStore;
use reelsmith_pipeline::{ContentPipeline, PromptLibrary, RunStore};
use reelsmith_research::{ResearchAggregator, ResearchCache, ResearchScraper};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PERSONA_ID: &str = "sat_coach";

/// Retry policy with millisecond backoff so failure tests stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        initial_backoff_ms: 1,
        max_delay_secs: 1,
        attempt_timeout_secs: 5,
    }
}

/// A pipeline over temp-dir stores with one seeded persona.
pub async fn seeded_pipeline(
    provider: ScriptedProvider,
    scrapers: Vec<Arc<dyn ResearchScraper>>,
) -> (ContentPipeline, TempDir) {
    let tmp = tempfile::tempdir().unwrap();

    let personas = PersonaStore::new(tmp.path().join("personas")).unwrap();
    personas
        .create(PERSONA_ID, "Ava", "SAT Exam Preparation", "High school juniors")
        .await
        .unwrap();

    let cache = ResearchCache::new(tmp.path().join("research_cache")).unwrap();
    let aggregator = ResearchAggregator::new(scrapers, cache);
    let runs = RunStore::new(tmp.path().join("runs")).unwrap();
    let clients: Vec<Arc<dyn ProviderClient>> = vec![Arc::new(provider)];
    let dispatcher = Dispatcher::new(clients, fast_retry());

    let pipeline = ContentPipeline::new(
        dispatcher,
        aggregator,
        personas,
        PromptLibrary::builtin(),
        runs,
    );
    (pipeline, tmp)
}

/// A scraper that records calls and returns a single canned record.
pub struct CountingScraper {
    platform: Platform,
    call_count: Arc<Mutex<usize>>,
}

impl CountingScraper {
    #[allow(dead_code)]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    #[allow(dead_code)]
    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl ResearchScraper for CountingScraper {
    async fn scrape(&self, niche: &str) -> Result<Vec<ResearchRecord>, ResearchError> {
        *self.call_count.lock().unwrap() += 1;
        Ok(vec![ResearchRecord {
            platform: self.platform,
            niche: niche.to_string(),
            payload: ResearchPayload::Reddit {
                title: "Most students study the wrong sections first".to_string(),
                subreddit: "sat".to_string(),
                score: 412,
                comments: 38,
            },
            fetched_at: Utc::now(),
        }])
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// A scraper that always fails, for outage paths.
#[allow(dead_code)]
pub struct DownScraper {
    pub platform: Platform,
}

#[async_trait]
impl ResearchScraper for DownScraper {
    async fn scrape(&self, _niche: &str) -> Result<Vec<ResearchRecord>, ResearchError> {
        Err(ResearchError::new(ResearchErrorKind::ScraperUnavailable {
            platform: self.platform.to_string(),
            reason: "HTTP 503".to_string(),
        }))
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// JSON for one idea object with the canonical field names.
pub fn idea_json(i: u32) -> String {
    format!(
        r#"{{"title":"Idea {i}","hook":"Why do {i} out of 10 students miss this?","concept":"Concept {i}","key_points":["point a","point b"],"rationale":"resonates with test anxiety","trending_angle":"score plateaus","engagement_potential":"high"}}"#
    )
}

/// JSON array of `n` ideas.
pub fn ideas_array_json(n: u32) -> String {
    let items: Vec<String> = (1..=n).map(idea_json).collect();
    format!("[{}]", items.join(","))
}

/// JSON for one script object.
pub fn script_json(i: u32) -> String {
    format!(
        r#"{{"title":"Idea {i}","hook":"Stop doing this on test day.","main_content":["First, skip the hardest question.","Then come back with fresh eyes."],"call_to_action":"Save this for test week.","estimated_duration_seconds":30}}"#
    )
}

/// JSON for one visual suggestion object.
pub fn visual_json() -> String {
    r#"{"b_roll":["student flipping through practice book"],"text_overlays":["SKIP IT"],"animations":["quick zoom"],"color_scheme":["navy","gold"],"music_mood":"focused lo-fi","shot_list":["close-up on timer"]}"#
        .to_string()
}
