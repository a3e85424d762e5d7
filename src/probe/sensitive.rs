// src/probe/sensitive.rs
// =============================================================================
// Probes the seed's origin for paths that should never be public.
//
// How it works:
// 1. Take the origin (scheme://host[:port]) of the seed URL
// 2. GET origin + "/" + candidate for every entry in a fixed wordlist
// 3. Keep the candidates that answer with a 2xx status
//
// The probe shares the crawl's FetchClient, so it rides the same connection
// pool and the same concurrency cap. A candidate that fails at the transport
// level is logged and skipped; it does not stop the probe.
// =============================================================================

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CrawlError;
use crate::fetch::FetchClient;

pub const SENSITIVE_PATHS: &[&str] = &[
    ".git",
    ".svn",
    ".DS_Store",
    "CVS",
    "backup",
    "backups",
    "backup_files",
    "backup_files_old",
    "backup_old",
    "backup_old_versions",
    "old",
    "old_versions",
    "old_files",
    "test",
    "tests",
    "temp",
    "tmp",
    "logs",
    "log",
    "debug",
    ".env",
];

// Candidates in flight at once; results keep wordlist order regardless
const PROBE_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveDirectoryHit {
    pub base_origin: String,
    pub path: String,
}

impl SensitiveDirectoryHit {
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_origin, self.path)
    }
}

// Runs the whole wordlist against the origin of `base`
pub async fn probe(client: &FetchClient, base: &Url) -> Vec<SensitiveDirectoryHit> {
    let origin = base.origin().ascii_serialization();
    info!(origin = %origin, "Searching for sensitive directories");

    let checks = SENSITIVE_PATHS
        .iter()
        .map(|candidate| probe_one(client, &origin, candidate));

    let hits: Vec<_> = stream::iter(checks)
        .buffered(PROBE_CONCURRENCY)
        .filter_map(|hit| async move { hit })
        .collect()
        .await;

    info!(origin = %origin, hits = hits.len(), "Sensitive directory probe finished");
    hits
}

async fn probe_one(client: &FetchClient, origin: &str, candidate: &str) -> Option<SensitiveDirectoryHit> {
    let target = format!("{}/{}", origin, candidate);
    let url = match Url::parse(&target) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %target, error = %e, "Skipping probe candidate");
            return None;
        }
    };

    match client.fetch(&url).await {
        Ok(response) if response.status.is_success() => {
            info!(url = %url, status = response.status.as_u16(), "Sensitive path exposed");
            Some(SensitiveDirectoryHit {
                base_origin: origin.to_string(),
                path: candidate.to_string(),
            })
        }
        Ok(response) => {
            debug!(url = %url, status = response.status.as_u16(), "Probe miss");
            None
        }
        Err(CrawlError::Cancelled) => None,
        Err(e) => {
            warn!(url = %url, kind = e.kind(), error = %e, "Probe failed");
            None
        }
    }
}
