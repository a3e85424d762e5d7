// src/error.rs
// =============================================================================
// Error taxonomy for the crawler.
//
// Every error below is caught at the narrowest scope possible (one URL, one
// probe candidate, one exported file) and turned into a log line. None of them
// travel up through the recursion.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[from]: lets the ? operator convert library errors automatically
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network, timeout, DNS or TLS failure while talking to the origin
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The origin answered with something other than 200 OK
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// The body could not be turned into a document
    #[error("parse error: {0}")]
    Parse(String),

    /// The document lacked the structure needed to build a page record
    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An absolute URL whose scheme is neither http nor https
    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A blocking worker (e.g. a file write) panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The session was interrupted before this unit of work finished
    #[error("crawl cancelled")]
    Cancelled,
}

impl CrawlError {
    // Short label used in skip log lines
    //
    // Fetch errors are split the same way a link checker would report them:
    // timeouts, DNS failures, TLS problems and plain connection failures.
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::Fetch(e) => {
                let text = e.to_string().to_lowercase();
                if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() && text.contains("dns") {
                    "dns"
                } else if text.contains("certificate") || text.contains("ssl") || text.contains("tls") {
                    "tls"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_decode() || e.is_body() {
                    "body"
                } else {
                    "fetch"
                }
            }
            CrawlError::Status { .. } => "status",
            CrawlError::Parse(_) => "parse",
            CrawlError::Extraction(_) => "extraction",
            CrawlError::InvalidUrl(_) | CrawlError::UnsupportedScheme(_) => "url",
            CrawlError::Io(_) => "io",
            CrawlError::Serialize(_) => "serialize",
            CrawlError::Join(_) => "task",
            CrawlError::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = CrawlError::Status {
            url: "https://example.com/admin".to_string(),
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(err.to_string(), "HTTP 403 Forbidden from https://example.com/admin");
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_url_error_converts() {
        let err: CrawlError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.kind(), "url");
    }

    #[test]
    fn test_unsupported_scheme_message() {
        let err = CrawlError::UnsupportedScheme("ftp".to_string());
        assert_eq!(err.to_string(), "unsupported URL scheme 'ftp', expected http or https");
        assert_eq!(err.kind(), "url");
    }

    #[tokio::test]
    async fn test_failed_blocking_write_is_task_error() {
        let join = tokio::task::spawn_blocking(|| -> () { panic!("write failed") })
            .await
            .unwrap_err();
        let err: CrawlError = join.into();
        assert_eq!(err.kind(), "task");
    }
}
