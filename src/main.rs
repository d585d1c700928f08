//! listing-harvester entry point
//!
//! Crawls a paginated document listing and downloads every linked file that
//! is not yet in the output directory.

use clap::Parser;
use harvester::crawler::CrawlerBuilder;
use harvester::progress::StyleOptions;
use reqwest::header::{self, HeaderValue};
use reqwest::Url;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Harvest documents from a paginated listing
///
/// Pages are visited as `?page=N, N+1, …` starting from the page number in
/// START_URL (or 1). Files already present in the output directory are skipped.
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(version)]
#[command(about = "Harvest documents from a paginated listing", long_about = None)]
struct Cli {
    /// URL of the first listing page, e.g. https://peraturan.go.id/peraturan?page=3
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Directory where documents are stored
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Maximum number of concurrent transfers
    #[arg(short = 'c', long, default_value_t = 5)]
    concurrency: usize,

    /// Extension of the linked documents to collect
    #[arg(long, default_value = "pdf")]
    extension: String,

    /// CSS selector for document links, overriding --extension
    #[arg(long)]
    selector: Option<String>,

    /// Base URL document links are resolved against
    #[arg(long)]
    base_url: Option<Url>,

    /// Pause between listing pages, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Stop after visiting this many pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Fail a transfer that takes longer than this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Do not draw progress bars
    #[arg(long)]
    quiet_progress: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let crawler = match build_crawler(&cli) {
        Ok(crawler) => crawler,
        Err(e) => {
            tracing::error!("Failed to configure the crawler: {}", e.report());
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Saving documents to: {}", cli.output.display());

    let outcome = tokio::select! {
        result = crawler.crawl(&cli.start_url) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(report)) => {
            tracing::info!(
                "Visited {} pages from page {}: {} downloaded, {} skipped, {} failed",
                report.pages_visited,
                report.start_page,
                report.downloaded,
                report.skipped,
                report.failed
            );
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            tracing::error!("Crawl failed: {}", e.report());
            ExitCode::FAILURE
        }
        None => {
            tracing::warn!("Interrupted, unfinished transfers were abandoned");
            crawler.shutdown().await;
            ExitCode::from(130)
        }
    }
}

fn build_crawler(cli: &Cli) -> harvester::Result<harvester::Crawler> {
    let mut builder = CrawlerBuilder::new()
        .directory(cli.output.clone())
        .concurrent_downloads(cli.concurrency)
        .extension(&cli.extension)
        .page_delay(Duration::from_millis(cli.delay_ms));

    if let Some(ref selector) = cli.selector {
        builder = builder.selector(selector);
    }
    if let Some(ref base_url) = cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(max_pages) = cli.max_pages {
        builder = builder.max_pages(max_pages);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.transfer_timeout(Duration::from_secs(secs));
    }
    if let Some(ref ua) = cli.user_agent {
        let value = HeaderValue::from_str(ua)
            .map_err(|e| harvester::Error::Internal(format!("invalid user agent: {}", e)))?;
        builder = builder.header(header::USER_AGENT, value);
    }
    if cli.quiet_progress || cli.quiet {
        builder = builder.style_options(StyleOptions::hidden());
    }

    builder.build()
}

/// Sets up the tracing subscriber from `RUST_LOG`, falling back to the
/// verbosity flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("harvester=info,listing_harvester=info,warn"),
                1 => EnvFilter::new("harvester=debug,listing_harvester=debug,info"),
                2 => EnvFilter::new("harvester=trace,listing_harvester=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
