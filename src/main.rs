//! Acts-Harvester main entry point
//!
//! This is the command-line interface for the Acts-Harvester listing crawler.

use acts_harvester::config::{load_config_with_hash, Config};
use acts_harvester::crawler::{run_crawl, Coordinator};
use acts_harvester::output::{print_summary, ProgressCounter};
use acts_harvester::state::ResumeState;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Acts-Harvester: a resumable listing crawler
///
/// Acts-Harvester walks a paginated listing, fetches every listed document
/// and appends `(url, text)` rows to a CSV file. An interrupted run is
/// continued by passing the number of rows already written as
/// `--start-from-idx`.
#[derive(Parser, Debug)]
#[command(name = "acts-harvester")]
#[command(version)]
#[command(about = "A resumable listing crawler", long_about = None)]
struct Cli {
    /// Number of listed items (in site order) to skip before resuming
    #[arg(long, value_name = "N", default_value_t = 0)]
    start_from_idx: u64,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV file to append to (overrides output.csv-path)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Discover the listing bounds and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        handle_dry_run(config, cli.start_from_idx).await
    } else {
        handle_crawl(config, cli.start_from_idx, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("acts_harvester=info,warn"),
            1 => EnvFilter::new("acts_harvester=debug,info"),
            2 => EnvFilter::new("acts_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: discovers the bounds and shows the plan
async fn handle_dry_run(config: Config, start_from_idx: u64) -> anyhow::Result<()> {
    println!("=== Acts-Harvester Dry Run ===\n");

    println!("Listing: {}{}", config.site.base_url, config.site.listing_path);
    println!("Output: {}", config.output.csv_path);
    println!("Item concurrency: {}", config.crawler.item_concurrency);

    let resume = ResumeState::new(start_from_idx);
    let coordinator = Coordinator::new(config, resume, Arc::new(ProgressCounter::new()))?;
    let discovery = coordinator.plan().await.context("Bounds discovery failed")?;
    let bounds = discovery.bounds;
    let pages = bounds.page_indices(&resume);

    println!("\nListing bounds:");
    println!("  Items on site: {}", discovery.site_total);
    println!("  Page size: {}", bounds.page_size());
    println!("  Paged listing URL: {}", discovery.page_base_url);

    println!("\nResume point:");
    println!("  Start index: {}", resume.start_from_idx());
    println!("  Start page: {}", resume.start_page_idx(bounds.page_size()));
    println!(
        "  Skipped on start page: {}",
        resume.start_in_page_offset(bounds.page_size())
    );

    println!("\n✓ Would fetch {} documents", bounds.total_items());
    if pages.is_empty() {
        println!("✓ Nothing left to crawl");
    } else {
        println!(
            "✓ Would visit pages {} through {} ({} pages)",
            pages.start,
            pages.end - 1,
            pages.end - pages.start
        );
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, start_from_idx: u64, quiet: bool) -> anyhow::Result<()> {
    if start_from_idx > 0 {
        tracing::info!("Resuming crawl from item index {}", start_from_idx);
    } else {
        tracing::info!("Starting crawl from the first item");
    }

    let summary = run_crawl(config, start_from_idx, quiet)
        .await
        .context("Crawl failed")?;

    if !quiet {
        print_summary(&summary);
    }

    Ok(())
}
