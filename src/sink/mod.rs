// src/sink/mod.rs
// =============================================================================
// Where extracted page records go.
//
// The crawl engine only sees the PageSink trait. The binary plugs in
// JsonFileSink; tests plug in a sink that keeps records in memory.
// =============================================================================

mod json;

pub use json::JsonFileSink;

use crate::error::CrawlError;
use crate::parser::PageRecord;

// Receives ownership of each record exactly once
//
// Called from concurrent crawl branches, hence Send + Sync.
pub trait PageSink: Send + Sync {
    fn accept(&self, record: PageRecord) -> Result<(), CrawlError>;
}
