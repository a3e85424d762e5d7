// src/crawl/session.rs
// =============================================================================
// One invocation of the tool, from seed to report.
//
// A session owns:
// - the normalized seed URL
// - the FetchClient (shared by the crawl and the prober)
// - the Crawler, which owns the VisitedSet
//
// run() drives the crawl and the sensitive path probe at the same time and
// returns once both are done. The session is dropped afterwards, taking the
// visited set and the connection pool with it.
// =============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use url::Url;

use super::config::CrawlConfig;
use super::engine::{CrawlSummary, Crawler};
use super::frontier::normalize_seed;
use crate::error::CrawlError;
use crate::fetch::FetchClient;
use crate::probe::{self, SensitiveDirectoryHit};
use crate::sink::{JsonFileSink, PageSink};

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub seed: String,
    pub crawl: CrawlSummary,
    pub sensitive_directories: Vec<SensitiveDirectoryHit>,
    pub elapsed: Duration,
}

pub struct CrawlSession {
    seed: Url,
    probe_enabled: bool,
    client: FetchClient,
    crawler: Crawler,
}

impl CrawlSession {
    // Session writing page records as JSON files under config.output_dir
    pub fn new(seed: &str, config: CrawlConfig, cancel: CancellationToken) -> Result<Self, CrawlError> {
        let sink = Arc::new(JsonFileSink::new(&config.output_dir)?);
        Self::with_sink(seed, config, cancel, sink)
    }

    pub fn with_sink(
        seed: &str,
        config: CrawlConfig,
        cancel: CancellationToken,
        sink: Arc<dyn PageSink>,
    ) -> Result<Self, CrawlError> {
        let seed = normalize_seed(seed)?;
        let client = FetchClient::new(&config, cancel)?;
        let probe_enabled = config.probe;
        let crawler = Crawler::new(seed.clone(), config, client.clone(), sink);

        Ok(Self {
            seed,
            probe_enabled,
            client,
            crawler,
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub async fn run(&self) -> SessionReport {
        let started = Instant::now();

        let probe_task = async {
            if self.probe_enabled {
                probe::probe(&self.client, &self.seed).await
            } else {
                Vec::new()
            }
        };
        let (crawl, sensitive_directories) = tokio::join!(self.crawler.run(), probe_task);

        SessionReport {
            seed: self.seed.to_string(),
            crawl,
            sensitive_directories,
            elapsed: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_session_crawls_probes_and_exports() {
        let mut server = Server::new_async().await;
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"<title>Home</title><p>Welcome</p><form action="/login"></form>"#)
            .create_async()
            .await;
        let _env = server.mock("GET", "/.env").with_status(200).create_async().await;
        for candidate in probe::SENSITIVE_PATHS.iter().filter(|c| **c != ".env") {
            server
                .mock("GET", format!("/{}", candidate).as_str())
                .with_status(404)
                .create_async()
                .await;
        }

        let dir = TempDir::new().unwrap();
        let config = CrawlConfig::builder()
            .delay_ms(0)
            .output_dir(dir.path())
            .build();
        let session = CrawlSession::new(&server.url(), config, CancellationToken::new()).unwrap();
        let report = session.run().await;

        assert_eq!(report.crawl.records_written, 1);
        assert_eq!(report.sensitive_directories.len(), 1);
        assert_eq!(report.sensitive_directories[0].path, ".env");

        let file = dir.path().join(format!("{}_.json", server.url().replace([':', '/'], "_")));
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(file).unwrap()).unwrap();
        assert_eq!(written["Title"], "Home");
        assert_eq!(written["Form Links"], serde_json::json!(["/login"]));
    }

    #[tokio::test]
    async fn test_probe_can_be_disabled() {
        let mut server = Server::new_async().await;
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<p>hi</p>")
            .create_async()
            .await;
        let backup = server.mock("GET", "/backup").expect(0).create_async().await;

        let dir = TempDir::new().unwrap();
        let config = CrawlConfig::builder()
            .delay_ms(0)
            .probe(false)
            .output_dir(dir.path())
            .build();
        let session = CrawlSession::new(&server.url(), config, CancellationToken::new()).unwrap();
        let report = session.run().await;

        backup.assert_async().await;
        assert!(report.sensitive_directories.is_empty());
        assert_eq!(report.crawl.pages_fetched, 1);
    }

    #[test]
    fn test_bare_domain_seed() {
        let dir = TempDir::new().unwrap();
        let config = CrawlConfig::builder().output_dir(dir.path()).build();
        let session = CrawlSession::new("example.com", config, CancellationToken::new()).unwrap();
        assert_eq!(session.seed().as_str(), "https://example.com/");
    }
}
