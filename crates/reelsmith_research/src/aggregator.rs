//! Best-effort aggregation across the configured scrapers.

use crate::cache::{CacheEntry, ResearchCache};
use crate::scraper::ResearchScraper;
use reelsmith_core::{PlatformOutage, ResearchBundle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Gathers research from every configured scraper into one bundle.
///
/// Per platform: a cache entry younger than `max_age` is reused; otherwise
/// the scraper runs and its result becomes a new cache entry. A failing
/// scraper is recorded as a [`PlatformOutage`] and aggregation continues.
/// A failing cache write is logged and the fetched records are still used.
pub struct ResearchAggregator {
    scrapers: Vec<Arc<dyn ResearchScraper>>,
    cache: ResearchCache,
}

impl std::fmt::Debug for ResearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let platforms: Vec<String> = self
            .scrapers
            .iter()
            .map(|s| s.platform().to_string())
            .collect();
        f.debug_struct("ResearchAggregator")
            .field("platforms", &platforms)
            .finish_non_exhaustive()
    }
}

impl ResearchAggregator {
    /// Creates an aggregator over the given scrapers and cache.
    pub fn new(scrapers: Vec<Arc<dyn ResearchScraper>>, cache: ResearchCache) -> Self {
        Self { scrapers, cache }
    }

    /// Platforms covered by the configured scrapers.
    pub fn platforms(&self) -> Vec<reelsmith_core::Platform> {
        self.scrapers.iter().map(|s| s.platform()).collect()
    }

    /// Assembles a research bundle for the niche.
    ///
    /// Never fails: platforms that cannot be reached appear in the
    /// bundle's `unavailable` list, and with no scrapers configured the
    /// result is simply empty.
    #[instrument(skip(self), fields(scrapers = self.scrapers.len()))]
    pub async fn get_research(&self, niche: &str, max_age: Duration) -> ResearchBundle {
        let mut bundle = ResearchBundle::empty(niche);

        for scraper in &self.scrapers {
            let platform = scraper.platform();

            match self.cache.latest(niche, platform).await {
                Ok(Some(entry)) if entry.is_fresh(max_age) => {
                    debug!(platform = %platform, records = entry.records.len(), "Reusing cached research");
                    bundle.records.extend(entry.records);
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    // A broken cache read is a miss, not an outage.
                    warn!(platform = %platform, error = %e, "Cache read failed, fetching fresh");
                }
            }

            match scraper.scrape(niche).await {
                Ok(records) => {
                    debug!(platform = %platform, records = records.len(), "Scraped fresh research");
                    let entry = CacheEntry::new(platform, niche, records.clone());
                    if let Err(e) = self.cache.store(&entry).await {
                        warn!(platform = %platform, error = %e, "Cache write failed, continuing uncached");
                    }
                    bundle.records.extend(records);
                }
                Err(e) => {
                    warn!(platform = %platform, error = %e, "Scraper unavailable");
                    bundle.unavailable.push(PlatformOutage {
                        platform,
                        reason: e.kind.to_string(),
                    });
                }
            }
        }

        debug!(
            records = bundle.records.len(),
            outages = bundle.unavailable.len(),
            "Assembled research bundle"
        );
        bundle
    }
}
