// src/crawl/config.rs
// =============================================================================
// Knobs for one crawl session.
//
// The defaults reproduce the tool's fixed behaviour: depth 3, a one second
// pause per branch, same-origin recursion. The CLI maps its flags onto the
// builder; tests use it to turn the pause off.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest level fetched; the seed is depth 0
    pub max_depth: usize,

    /// Pause each branch takes after its fetch
    pub delay_ms: u64,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Requests allowed on the wire at once
    pub max_concurrency: usize,

    /// Recurse into links that leave the seed's origin
    pub follow_external: bool,

    /// Run the sensitive path probe alongside the crawl
    pub probe: bool,

    /// Where page records are written
    pub output_dir: PathBuf,

    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            follow_external: false,
            probe: true,
            output_dir: PathBuf::from("."),
            user_agent: format!("site-sentry/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::new()
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CrawlConfig::default(),
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    pub fn follow_external(mut self, follow_external: bool) -> Self {
        self.config.follow_external = follow_external;
        self
    }

    pub fn probe(mut self, probe: bool) -> Self {
        self.config.probe = probe;
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn build(self) -> CrawlConfig {
        self.config
    }
}
