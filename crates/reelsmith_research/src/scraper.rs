//! The scraper seam.

use async_trait::async_trait;
use reelsmith_core::{Platform, ResearchRecord};
use reelsmith_error::ResearchError;

/// Object-safe seam over a platform scraper.
///
/// Concrete site scrapers are external collaborators; the aggregator only
/// needs this surface. Implementations must tag every returned record with
/// their own [`Platform`].
#[async_trait]
pub trait ResearchScraper: Send + Sync {
    /// Fetches current records for the given niche.
    async fn scrape(&self, niche: &str) -> Result<Vec<ResearchRecord>, ResearchError>;

    /// The platform this scraper covers.
    fn platform(&self) -> Platform;
}
