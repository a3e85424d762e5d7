// src/crawl/engine.rs
// =============================================================================
// The recursive, depth-bounded crawl.
//
// For one (url, depth) task:
// 1. Drop it if depth is past the limit
// 2. Claim it in the VisitedSet; drop it if someone already did
// 3. Fetch it; anything but 200 ends here
// 4. Parse the body
// 5. Resolve hrefs into absolute child URLs
// 6. Crawl all children at depth + 1 concurrently and wait for them
// 7. Log the page's external resources
// 8. Extract the PageRecord and hand it to the sink
// 9. Pause before this branch returns
//
// Every failure along the way is logged with the URL and turns into a skip.
// Nothing is re-thrown up the recursion, so one bad page never stops the
// rest of the crawl.
//
// Rust concepts:
// - BoxFuture: an async fn can't call itself directly (its future would
//   have infinite size), so the recursive step returns a boxed future
// - join_all: runs sibling futures concurrently on the current task
// - Atomics: counters updated from many branches without a lock
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashSet;
use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::{debug, info, warn};
use url::Url;

use super::config::CrawlConfig;
use super::frontier::{resolve_link, same_origin, VisitedSet};
use crate::error::CrawlError;
use crate::fetch::FetchClient;
use crate::parser::{Document, ExternalResources, PageRecord};
use crate::sink::PageSink;

// What a single page yields once its Document has been dropped
//
// scraper's Html is not Send, so everything we need from it is copied out
// before the task awaits its children.
struct PageScan {
    has_interactive_form: bool,
    links: Vec<Url>,
    resources: ExternalResources,
    record: Result<PageRecord, CrawlError>,
}

// Why a task ended without producing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    DepthExceeded,
    Duplicate,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicUsize,
    records_written: AtomicUsize,
    skipped_depth: AtomicUsize,
    skipped_duplicate: AtomicUsize,
    failed: AtomicUsize,
    // DashSet answers "seen before?", the Vec keeps discovery order
    external_seen: DashSet<String>,
    external_links: Mutex<Vec<String>>,
}

// Totals for one finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_fetched: usize,
    pub records_written: usize,
    pub skipped_depth: usize,
    pub skipped_duplicate: usize,
    pub failed: usize,
    pub urls_claimed: usize,
    /// Cross-origin links that were discovered but not followed
    pub external_links: Vec<String>,
}

impl CrawlStats {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_external(&self, url: &Url) {
        // only the first sighting of a link takes the lock
        if !self.external_seen.insert(url.to_string()) {
            return;
        }
        if let Ok(mut links) = self.external_links.lock() {
            links.push(url.to_string());
        }
    }

    pub fn snapshot(&self) -> CrawlSummary {
        CrawlSummary {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            skipped_depth: self.skipped_depth.load(Ordering::Relaxed),
            skipped_duplicate: self.skipped_duplicate.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            urls_claimed: 0,
            external_links: self
                .external_links
                .lock()
                .map(|links| links.clone())
                .unwrap_or_default(),
        }
    }
}

pub struct Crawler {
    root: Url,
    config: CrawlConfig,
    client: FetchClient,
    visited: VisitedSet,
    sink: Arc<dyn PageSink>,
    stats: CrawlStats,
}

impl Crawler {
    pub fn new(root: Url, config: CrawlConfig, client: FetchClient, sink: Arc<dyn PageSink>) -> Self {
        Self {
            root,
            config,
            client,
            visited: VisitedSet::new(),
            sink,
            stats: CrawlStats::default(),
        }
    }

    #[cfg(test)]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    // Crawls from the root at depth 0 and returns once every branch is done
    pub async fn run(&self) -> CrawlSummary {
        info!(url = %self.root, max_depth = self.config.max_depth, "Starting crawl");
        self.crawl(self.root.clone(), 0).await;

        let mut summary = self.stats.snapshot();
        summary.urls_claimed = self.visited.len();
        summary
    }

    fn crawl(&self, url: Url, depth: usize) -> BoxFuture<'_, ()> {
        async move {
            info!(url = %url, depth, "Analyzing URL");

            if let Err(skip) = self.admit(&url, depth) {
                debug!(url = %url, depth, reason = ?skip, "Skipped");
                return;
            }

            let result = self.visit(&url, depth).await;
            if let Err(e) = &result {
                if matches!(e, CrawlError::Cancelled) {
                    debug!(url = %url, "Skipped, crawl cancelled");
                    return;
                }
                CrawlStats::bump(&self.stats.failed);
                warn!(url = %url, kind = e.kind(), error = %e, "Error processing URL");
            }

            // simple per-branch rate limiting, after success or failure
            self.client.pause().await;
        }
        .boxed()
    }

    // Steps 1 and 2: depth bound, then claim
    fn admit(&self, url: &Url, depth: usize) -> Result<(), Skip> {
        if depth > self.config.max_depth {
            CrawlStats::bump(&self.stats.skipped_depth);
            return Err(Skip::DepthExceeded);
        }
        if self.client.cancel_token().is_cancelled() {
            return Err(Skip::Cancelled);
        }
        if !self.visited.try_claim(url.as_str()) {
            CrawlStats::bump(&self.stats.skipped_duplicate);
            return Err(Skip::Duplicate);
        }
        Ok(())
    }

    // Steps 3 to 8 for a claimed URL
    async fn visit(&self, url: &Url, depth: usize) -> Result<(), CrawlError> {
        // Fetch the page; transport errors and cancellation bubble up as-is
        let response = self.client.fetch(url).await?;

        // Only a 200 carries a body worth parsing; anything else is a skip
        // and contributes no children
        if !response.is_ok() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        CrawlStats::bump(&self.stats.pages_fetched);

        // Parse and pull out everything we need before the next await
        let scan = scan_page(url, &response.body)?;
        if scan.has_interactive_form {
            info!(url = %url, "Scrape found: page has a form or text input");
        }

        // The link count covers every resolved link, external ones included
        let discovered = scan.links.len();
        let children = self.select_children(scan.links, depth);
        info!(
            url = %url,
            links = discovered,
            followed = children.len(),
            "Crawling from page"
        );

        // Fan out and wait for every child subtree to finish
        join_all(children.into_iter().map(|child| self.crawl(child, depth + 1))).await;

        report_resources(url, &scan.resources);

        // A record that failed to extract is logged by the caller like any
        // other skip; the children above were still crawled
        let record = scan.record?;
        info!(
            url = %url,
            title = %record.title,
            paragraphs = record.paragraphs.len(),
            "Scraped data"
        );
        // Sinks may touch the disk, so keep them off the async worker
        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.accept(record)).await??;
        CrawlStats::bump(&self.stats.records_written);
        Ok(())
    }

    // Applies the origin policy to resolved links
    //
    // Children past the depth limit are still returned; admit() drops and
    // counts them when they come back in as tasks.
    fn select_children(&self, links: Vec<Url>, depth: usize) -> Vec<Url> {
        let mut children = Vec::with_capacity(links.len());
        for link in links {
            // External links are remembered for the summary, not crawled
            if !self.config.follow_external && !same_origin(&self.root, &link) {
                debug!(url = %link, depth, "Not following external link");
                self.stats.record_external(&link);
                continue;
            }
            // Same link twice on one page: dispatch it once
            if !children.contains(&link) {
                children.push(link);
            }
        }
        children
    }
}

// Steps 4 and 5, plus everything later steps need from the Document
fn scan_page(url: &Url, body: &str) -> Result<PageScan, CrawlError> {
    let document = Document::parse(body)?;

    let links = document
        .links()?
        .iter()
        .filter_map(|href| resolve_link(url, href))
        .collect();

    Ok(PageScan {
        has_interactive_form: document.has_interactive_form()?,
        links,
        resources: document.external_resources()?,
        record: document.extract_page(url.as_str()),
    })
}

fn report_resources(url: &Url, resources: &ExternalResources) {
    if resources.is_empty() {
        debug!(url = %url, "No external resources");
        return;
    }
    for (kind, found) in resources.iter() {
        info!(url = %url, kind = kind.label(), resources = ?found, "External resources found");
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why join_all and not tokio::spawn?
//    - Spawned tasks must be 'static, so every child would need an Arc to
//      the crawler
//    - join_all polls the children on the current task; they still overlap
//      while waiting on the network, which is the only place they block
//
// 2. Why is the claim made before the fetch?
//    - Two siblings can discover the same URL at the same moment
//    - Claiming first means the loser sees the entry and backs off before
//      any request goes out
//
// 3. What does `.await??` mean?
//    - spawn_blocking returns Result<T, JoinError>; T is the sink's Result
//    - The first ? unwraps the join, the second the sink's own error
// -----------------------------------------------------------------------------
