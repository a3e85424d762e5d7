// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Recursive, depth-bounded crawling starting from a seed URL
// - Children of a page are crawled concurrently, then the page is extracted
// - A shared visited set so no URL is fetched twice
// - Same-origin recursion by default, external links are only recorded
// - Polite crawling with a fixed pause per branch
//
// Submodules:
// - config: CrawlConfig and its builder
// - frontier: visited set and URL resolution
// - engine: the recursive crawl itself
// - session: wires crawl, probe and sink together for one run
// =============================================================================

mod config;
mod engine;
mod frontier;
mod session;

pub use config::{
    CrawlConfig, DEFAULT_DELAY_MS, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS,
};
pub use engine::CrawlSummary;
pub use session::{CrawlSession, SessionReport};
