// src/fetch/mod.rs
// =============================================================================
// HTTP fetching shared by the crawl engine and the sensitive path prober.
// =============================================================================

mod client;

pub use client::FetchClient;
