//! Shared test utilities.

pub mod stub_scraper;
