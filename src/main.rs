// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install the tracing subscriber
// 3. Wire Ctrl-C to a cancellation token
// 4. Run one crawl session (crawl + sensitive path probe)
// 5. Print the summary and exit with a proper code
//    (0 = finished, 2 = setup error, 130 = interrupted)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;
mod parser;
mod probe;
mod sink;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use cli::Cli;
use crawl::{CrawlSession, CrawlSummary, SessionReport};

const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let config = cli.crawl_config();
    let session = CrawlSession::new(&cli.domain, config, cancel.clone())
        .with_context(|| format!("could not start a crawl for '{}'", cli.domain))?;

    println!("Starting crawl at: {}", session.seed());
    let report = session.run().await;

    print_report(&report);

    if cancel.is_cancelled() {
        warn!("Program interrupted by user, exiting");
        return Ok(EXIT_INTERRUPTED);
    }

    info!("Execution time: {:.2} seconds", report.elapsed.as_secs_f64());
    Ok(0)
}

// Ctrl-C stops new fetches; whatever is in flight is abandoned
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping crawl");
            cancel.cancel();
        }
    });
}

fn print_report(report: &SessionReport) {
    print_crawl_summary(&report.seed, &report.crawl);

    let found: Vec<_> = report
        .sensitive_directories
        .iter()
        .map(|hit| hit.url())
        .collect();
    println!("Sensitive directories found: {:?}", found);
}

fn print_crawl_summary(seed: &str, summary: &CrawlSummary) {
    println!();
    println!("Crawl summary for {}:", seed);
    println!("   Pages fetched:       {}", summary.pages_fetched);
    println!("   Records written:     {}", summary.records_written);
    println!("   URLs claimed:        {}", summary.urls_claimed);
    println!("   Failed:              {}", summary.failed);
    println!("   Skipped (depth):     {}", summary.skipped_depth);
    println!("   Skipped (duplicate): {}", summary.skipped_duplicate);
    println!("   External links:      {}", summary.external_links.len());
}
