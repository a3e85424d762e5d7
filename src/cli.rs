// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// One positional argument (the domain or URL to crawl) plus a handful of
// optional flags. Every flag has a default that reproduces the tool's fixed
// behaviour, so `site-sentry example.com` is all most runs need.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::crawl::{
    CrawlConfig, DEFAULT_DELAY_MS, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "site-sentry",
    version,
    about = "Crawl a site, export page data as JSON, and probe for exposed sensitive paths",
    long_about = "site-sentry recursively crawls a website up to a fixed depth, writes the title, \
                  paragraphs and form targets of every page to a JSON file, logs the external \
                  resources each page references, and checks the site's origin for paths like \
                  .git, .env or backup that should not be public."
)]
pub struct Cli {
    /// Domain or URL to crawl (e.g. example.com or https://example.com/blog)
    ///
    /// https:// is prepended when no scheme is given
    pub domain: String,

    /// Maximum crawl depth; the starting page is depth 0
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Pause in milliseconds each crawl branch takes after a request
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Directory the per-page JSON files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also recurse into links that leave the starting origin
    #[arg(long)]
    pub follow_external: bool,

    /// Skip the sensitive path probe
    #[arg(long)]
    pub no_probe: bool,

    /// Log debug output (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::builder()
            .max_depth(self.max_depth)
            .delay_ms(self.delay_ms)
            .timeout_secs(self.timeout_secs)
            .max_concurrency(self.concurrency)
            .follow_external(self.follow_external)
            .probe(!self.no_probe)
            .output_dir(self.output_dir.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["site-sentry", "example.com"]).unwrap();
        let config = cli.crawl_config();

        assert_eq!(cli.domain, "example.com");
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.delay_ms, 1000);
        assert!(config.probe);
        assert!(!config.follow_external);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "site-sentry",
            "https://example.com",
            "--max-depth",
            "1",
            "--delay-ms",
            "0",
            "--follow-external",
            "--no-probe",
            "--output-dir",
            "out",
        ])
        .unwrap();
        let config = cli.crawl_config();

        assert_eq!(config.max_depth, 1);
        assert_eq!(config.delay_ms, 0);
        assert!(config.follow_external);
        assert!(!config.probe);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_domain_is_required() {
        assert!(Cli::try_parse_from(["site-sentry"]).is_err());
    }
}
