// src/crawl/frontier.rs
// =============================================================================
// Everything about URLs before they are fetched.
//
// - VisitedSet: the one synchronization point between crawl branches. A URL
//   is claimed the moment a branch decides to process it, not when it is done,
//   so two branches that discover the same link never both fetch it.
// - normalize_seed: turns "example.com" into "https://example.com/"
// - resolve_link: turns an href into an absolute child URL
// - same_origin: the recursion filter for external links
//
// Rust concepts:
// - DashSet: a HashSet split into shards, each behind its own lock.
//   insert() checks and inserts in one step and tells us if it was new.
// =============================================================================

use dashmap::DashSet;
use url::{ParseError, Url};

use crate::error::CrawlError;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns true iff this call inserted the URL
    //
    // The caller that gets `true` owns processing that URL. Entries are never
    // removed during a session.
    pub fn try_claim(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

// Accepts a bare domain or a full URL
//
// Schemes are matched case-insensitively (the url crate lowercases them), so
// "HTTPS://example.com" keeps its scheme. Input that does not parse as an
// absolute URL, or that parses but never had a "://" (e.g. "localhost:8080",
// which would otherwise read as scheme "localhost"), gets https:// in front.
//
// Examples:
//   "example.com"          -> "https://example.com/"
//   "HTTP://example.com/a" -> "http://example.com/a"
//   "ftp://example.com"    -> Err(UnsupportedScheme)
pub fn normalize_seed(input: &str) -> Result<Url, CrawlError> {
    let input = input.trim();

    let mut url = match Url::parse(input) {
        // Already absolute with a scheme we can crawl
        Ok(url) if is_crawlable(&url) => url,
        // An explicit scheme we don't speak
        Ok(url) if input.contains("://") => {
            return Err(CrawlError::UnsupportedScheme(url.scheme().to_string()));
        }
        // "host:port" parses as a scheme, a bare domain doesn't parse at all
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", input))?,
        Err(e) => return Err(e.into()),
    };

    url.set_fragment(None);
    Ok(url)
}

fn is_crawlable(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

// Resolves an href against the page it was found on
//
// Returns None for anything we could never fetch (mailto:, javascript:,
// tel:, data:, or unparseable garbage). Fragments are dropped so that
// "/about#team" and "/about" are the same frontier entry.
//
// Examples (page = https://x.com/blog/post1):
//   "/about"   -> https://x.com/about
//   "post2"    -> https://x.com/blog/post2
//   "#comments"-> https://x.com/blog/post1
pub fn resolve_link(page: &Url, href: &str) -> Option<Url> {
    let mut url = page.join(href.trim()).ok()?;
    if !is_crawlable(&url) {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

// Scheme + host + port comparison
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}
