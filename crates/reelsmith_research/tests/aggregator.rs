//! Aggregation and cache behavior.

mod test_utils;

use reelsmith_core::Platform;
use reelsmith_research::{CacheEntry, ResearchAggregator, ResearchCache, ResearchScraper};
use std::sync::Arc;
use std::time::Duration;
use test_utils::stub_scraper::{FailingScraper, StubScraper, sample_record};

const SIX_HOURS: Duration = Duration::from_secs(6 * 3600);

fn cache_in(dir: &tempfile::TempDir) -> ResearchCache {
    ResearchCache::new(dir.path().join("research_cache")).unwrap()
}

#[tokio::test]
async fn store_then_latest_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let cache = cache_in(&dir);

    let entry = CacheEntry::new(
        Platform::Reddit,
        "fitness",
        vec![sample_record(Platform::Reddit, "fitness", "leg day")],
    );
    cache.store(&entry).await.unwrap();

    let loaded = cache.latest("fitness", Platform::Reddit).await.unwrap().unwrap();
    assert_eq!(loaded, entry);
}

#[tokio::test]
async fn latest_misses_for_unknown_niche() {
    let dir = tempfile::tempdir().unwrap();
    let cache = cache_in(&dir);
    assert!(cache.latest("nothing", Platform::News).await.unwrap().is_none());
}

#[tokio::test]
async fn refreshing_appends_instead_of_overwriting() {
    let dir = tempfile::tempdir().unwrap();
    let cache = cache_in(&dir);

    let first = CacheEntry::new(
        Platform::News,
        "fitness",
        vec![sample_record(Platform::News, "fitness", "old headline")],
    );
    cache.store(&first).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = CacheEntry::new(
        Platform::News,
        "fitness",
        vec![sample_record(Platform::News, "fitness", "new headline")],
    );
    cache.store(&second).await.unwrap();

    // Newest entry wins on read, and both files remain on disk.
    let loaded = cache.latest("fitness", Platform::News).await.unwrap().unwrap();
    assert_eq!(loaded.records[0].payload.title(), "new headline");

    let files = std::fs::read_dir(cache.dir())
        .unwrap()
        .filter_map(Result::ok)
        .count();
    assert_eq!(files, 2);
}

#[tokio::test]
async fn fresh_cache_entry_short_circuits_scraper() {
    let dir = tempfile::tempdir().unwrap();
    let cache = cache_in(&dir);

    let cached = CacheEntry::new(
        Platform::Reddit,
        "fitness",
        vec![sample_record(Platform::Reddit, "fitness", "cached post")],
    );
    cache.store(&cached).await.unwrap();

    let scraper = StubScraper::new(
        Platform::Reddit,
        vec![sample_record(Platform::Reddit, "fitness", "fresh post")],
    );
    let calls = scraper.call_counter();
    let aggregator = ResearchAggregator::new(vec![Arc::new(scraper)], cache);

    let bundle = aggregator.get_research("fitness", SIX_HOURS).await;
    assert_eq!(bundle.records.len(), 1);
    assert_eq!(bundle.records[0].payload.title(), "cached post");
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn stale_cache_entry_triggers_fresh_scrape() {
    let dir = tempfile::tempdir().unwrap();
    let cache = cache_in(&dir);

    let cached = CacheEntry::new(
        Platform::Reddit,
        "fitness",
        vec![sample_record(Platform::Reddit, "fitness", "cached post")],
    );
    cache.store(&cached).await.unwrap();

    let scraper = StubScraper::new(
        Platform::Reddit,
        vec![sample_record(Platform::Reddit, "fitness", "fresh post")],
    );
    let calls = scraper.call_counter();
    let aggregator = ResearchAggregator::new(vec![Arc::new(scraper)], cache_in(&dir));
    drop(cache);

    // Zero max age makes every entry stale.
    let bundle = aggregator.get_research("fitness", Duration::ZERO).await;
    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(bundle.records[0].payload.title(), "fresh post");
}

#[tokio::test]
async fn scraper_failure_becomes_outage_and_others_continue() {
    let dir = tempfile::tempdir().unwrap();

    let healthy = StubScraper::new(
        Platform::News,
        vec![sample_record(Platform::News, "fitness", "headline")],
    );
    let scrapers: Vec<Arc<dyn ResearchScraper>> = vec![
        Arc::new(FailingScraper::new(Platform::Reddit)),
        Arc::new(healthy),
    ];
    let aggregator = ResearchAggregator::new(scrapers, cache_in(&dir));

    let bundle = aggregator.get_research("fitness", SIX_HOURS).await;
    assert_eq!(bundle.records.len(), 1);
    assert_eq!(bundle.unavailable.len(), 1);
    assert_eq!(bundle.unavailable[0].platform, Platform::Reddit);
    assert_eq!(bundle.sources_used(), 1);
}

#[tokio::test]
async fn all_scrapers_down_yields_valid_empty_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let scrapers: Vec<Arc<dyn ResearchScraper>> = vec![
        Arc::new(FailingScraper::new(Platform::Reddit)),
        Arc::new(FailingScraper::new(Platform::Youtube)),
    ];
    let aggregator = ResearchAggregator::new(scrapers, cache_in(&dir));

    let bundle = aggregator.get_research("fitness", SIX_HOURS).await;
    assert!(bundle.is_empty());
    assert_eq!(bundle.unavailable.len(), 2);
    assert_eq!(bundle.sources_used(), 0);
}

#[tokio::test]
async fn scrape_results_are_written_back_to_cache() {
    let dir = tempfile::tempdir().unwrap();

    let scraper = StubScraper::new(
        Platform::Youtube,
        vec![sample_record(Platform::Youtube, "fitness", "video")],
    );
    let aggregator = ResearchAggregator::new(vec![Arc::new(scraper)], cache_in(&dir));
    aggregator.get_research("fitness", SIX_HOURS).await;

    let cache = cache_in(&dir);
    let entry = cache.latest("fitness", Platform::Youtube).await.unwrap().unwrap();
    assert_eq!(entry.records.len(), 1);
}
