//! Research aggregation and caching for the Reelsmith content engine.
//!
//! Scrapers for the fixed platform set live behind the [`ResearchScraper`]
//! trait; this crate owns the aggregation loop and the append-only file
//! cache. Aggregation is best-effort by construction: a platform that fails
//! becomes a recorded outage in the resulting bundle, never an error, and an
//! empty bundle is a valid result.
//!
//! # Examples
//!
//! ```no_run
//! use reelsmith_research::{ResearchAggregator, ResearchCache};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = ResearchCache::new("data/research_cache")?;
//! let aggregator = ResearchAggregator::new(Vec::new(), cache);
//! let bundle = aggregator
//!     .get_research("SAT Exam Preparation", Duration::from_secs(6 * 3600))
//!     .await;
//! assert!(bundle.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregator;
mod cache;
mod scraper;

pub use aggregator::ResearchAggregator;
pub use cache::{CacheEntry, ResearchCache};
pub use scraper::ResearchScraper;
