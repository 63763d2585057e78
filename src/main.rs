//! Site-Trawler main entry point
//!
//! This is the command-line interface for the Site-Trawler crawler.

use anyhow::Context;
use clap::Parser;
use site_trawler::config::{load_config_with_hash, validate, Config};
use site_trawler::crawler::{crawl, CrawlMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Trawler: A polite site crawler
///
/// Site-Trawler discovers the pages of a site through its sitemap or by
/// breadth-first traversal, fetches them with bounded concurrency, and
/// appends links and content to per-run files in the data directory.
#[derive(Parser, Debug)]
#[command(name = "site-trawler")]
#[command(version)]
#[command(about = "A polite site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL to crawl
    #[arg(short, long)]
    url: String,

    /// Crawl mode: links, traverse, content or site
    #[arg(short, long, default_value = "site")]
    mode: String,

    /// Names the output files (defaults to a timestamp)
    #[arg(long)]
    run_key: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config)?;
            config
        }
    };

    let mode: CrawlMode = cli.mode.parse()?;
    let run_key = cli
        .run_key
        .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string());

    if cli.dry_run {
        print_dry_run(&config, mode, &cli.url, &run_key);
        return Ok(());
    }

    match crawl(config, mode, &cli.url, &run_key).await {
        Ok(report) => {
            tracing::info!(
                "Crawl completed: {} attempted, {} succeeded, {} failed",
                report.attempted,
                report.succeeded,
                report.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_trawler=info,warn"),
            1 => EnvFilter::new("site_trawler=debug,info"),
            2 => EnvFilter::new("site_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints the effective settings for --dry-run
fn print_dry_run(config: &Config, mode: CrawlMode, url: &str, run_key: &str) {
    println!("=== Site-Trawler Dry Run ===\n");

    println!("Run:");
    println!("  Mode: {}", mode);
    println!("  URL: {}", url);
    println!("  Run key: {}", run_key);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max URLs: {}", config.crawler.max_urls);
    println!("  Same origin only: {}", config.crawler.same_origin_only);
    println!("  Concurrency limit: {}", config.crawler.concurrency_limit);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    println!("\n✓ Configuration is valid");
}
