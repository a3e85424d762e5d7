// src/fetch/client.rs
// =============================================================================
// The HTTP side of the crawler.
//
// Key functionality:
// - One reqwest Client for the whole session, so TCP/TLS connections are
//   pooled and reused by every crawl branch and by the prober
// - A semaphore caps how many requests are on the wire at once
// - A fixed pause that each crawl branch takes after its fetch (simple
//   self-throttling, no global token bucket)
// - Every wait is raced against the session's cancellation token
//
// Rust concepts:
// - Clone on a struct of Arcs: every clone shares the same pool and permits
// - tokio::select!: whichever future finishes first wins
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::crawl::CrawlConfig;
use crate::error::CrawlError;

// A response that made it off the wire with a decodable body
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    /// Only 200 OK hands a body to the parser
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    permits: Arc<Semaphore>,
    delay: Duration,
    cancel: CancellationToken,
}

impl FetchClient {
    // Builds the shared connection pool
    //
    // This is the one failure that is fatal to a session: without a client
    // there is nothing to crawl with.
    pub fn new(config: &CrawlConfig, cancel: CancellationToken) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrency.max(1))),
            delay: config.delay(),
            cancel,
        })
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    // GETs a URL and reads the whole body as text
    //
    // Returns the status even when it is not 200; deciding what to do with a
    // 403 or a 404 is the caller's business.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, CrawlError> {
        // Nothing new goes on the wire after an interrupt
        if self.cancel.is_cancelled() {
            return Err(CrawlError::Cancelled);
        }

        // Losing the race drops fetch_inner, which releases its permit and
        // closes the half-read connection
        tokio::select! {
            _ = self.cancel.cancelled() => Err(CrawlError::Cancelled),
            result = self.fetch_inner(url) => result,
        }
    }

    async fn fetch_inner(&self, url: &Url) -> Result<FetchResponse, CrawlError> {
        // acquire only fails on a closed semaphore
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| CrawlError::Cancelled)?;

        // The permit is held until the body is read, not just the headers
        debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // Redirects were already followed by the client; a non-200 body is
        // still read so the connection can go back to the pool
        let body = response.text().await?;

        Ok(FetchResponse { status, body })
    }

    // The fixed inter-request pause for the calling branch
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep(self.delay) => {}
        }
    }
}
