//! Stub scrapers with scripted results and call counting.

use async_trait::async_trait;
use chrono::Utc;
use reelsmith_core::{Platform, ResearchPayload, ResearchRecord};
use reelsmith_error::{ResearchError, ResearchErrorKind};
use reelsmith_research::ResearchScraper;
use std::sync::{Arc, Mutex};

/// A scraper that always returns the same records.
pub struct StubScraper {
    platform: Platform,
    records: Vec<ResearchRecord>,
    call_count: Arc<Mutex<usize>>,
}

impl StubScraper {
    pub fn new(platform: Platform, records: Vec<ResearchRecord>) -> Self {
        Self {
            platform,
            records,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl ResearchScraper for StubScraper {
    async fn scrape(&self, _niche: &str) -> Result<Vec<ResearchRecord>, ResearchError> {
        *self.call_count.lock().unwrap() += 1;
        Ok(self.records.clone())
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// A scraper that always fails.
pub struct FailingScraper {
    platform: Platform,
}

impl FailingScraper {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl ResearchScraper for FailingScraper {
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

/// A record with a platform-appropriate payload.
pub fn sample_record(platform: Platform, niche: &str, title: &str) -> ResearchRecord {
    let payload = match platform {
        Platform::Reddit => ResearchPayload::Reddit {
            title: title.to_string(),
            subreddit: "test".to_string(),
            score: 100,
            comments: 10,
        },
        Platform::News => ResearchPayload::News {
            headline: title.to_string(),
            outlet: "Test Wire".to_string(),
            summary: "summary".to_string(),
        },
        Platform::Instagram => ResearchPayload::Instagram {
            caption: title.to_string(),
            hashtag: "test".to_string(),
            likes: 50,
            views: 1_000,
        },
        Platform::Youtube => ResearchPayload::Youtube {
            title: title.to_string(),
            channel: "Test Channel".to_string(),
            views: 5_000,
            likes: 200,
        },
        Platform::WebSearch => ResearchPayload::WebSearch {
            title: title.to_string(),
            snippet: "snippet".to_string(),
            domain: "example.com".to_string(),
        },
    };
    ResearchRecord {
        platform,
        niche: niche.to_string(),
        payload,
        fetched_at: Utc::now(),
    }
}
