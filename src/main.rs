//! CineCrawl main entry point
//!
//! Administrative command-line interface over a CineCrawl store.

use anyhow::Context;
use cinecrawl::catalog::{MovieCatalog, OmdbProvider};
use cinecrawl::config::{load_config_with_hash, Config};
use cinecrawl::crawler::{Admission, CrawlCoordinator};
use cinecrawl::output::{load_statistics, print_statistics};
use cinecrawl::storage::{reset_all, SqliteStorage, Storage};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CineCrawl: crawl coordination store for movie reviews
///
/// Inspects and maintains the shared store used by CineCrawl workers:
/// frontier, visited set, domain health, movie catalog, reviews and links.
#[derive(Parser, Debug)]
#[command(name = "cinecrawl")]
#[command(version)]
#[command(about = "Crawl coordination store for movie reviews", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print it without touching the store
    #[arg(long, conflicts_with_all = ["stats", "reset", "seed", "lookup"])]
    dry_run: bool,

    /// Show record counts from the store and exit
    #[arg(long, conflicts_with_all = ["reset", "seed", "lookup"])]
    stats: bool,

    /// Delete every record from the store
    #[arg(long, conflicts_with_all = ["seed", "lookup"])]
    reset: bool,

    /// Offer URLs to the frontier at the default priority
    #[arg(long, value_name = "URL", num_args = 1.., conflicts_with = "lookup")]
    seed: Vec<String>,

    /// Fetch metadata for a movie title and add it to the catalog
    #[arg(long, value_name = "TITLE")]
    lookup: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let storage: Arc<dyn Storage> = Arc::new(
        SqliteStorage::open(&config.store)
            .with_context(|| format!("Failed to open store {}", config.store.database_path))?,
    );

    if cli.stats {
        print_statistics(&load_statistics(storage.as_ref())?);
    } else if cli.reset {
        reset_all(storage.as_ref())?;
        println!("✓ Store reset: {}", config.store.database_path);
    } else if !cli.seed.is_empty() {
        handle_seed(storage, &config, &cli.seed);
    } else if let Some(title) = cli.lookup {
        handle_lookup(storage, &config, &title).await?;
    } else {
        print_statistics(&load_statistics(storage.as_ref())?);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cinecrawl=info,warn"),
            1 => EnvFilter::new("cinecrawl=debug,info"),
            2 => EnvFilter::new("cinecrawl=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== CineCrawl Dry Run ===\n");

    println!("Store:");
    println!("  Database: {}", config.store.database_path);
    println!("  Busy timeout: {}ms", config.store.busy_timeout_ms);
    println!("  Unique reviews: {}", config.store.unique_reviews);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nMetadata Provider:");
    println!("  Endpoint: {}", config.provider.endpoint);
    println!(
        "  API key: {}",
        if config.provider.api_key.is_some() { "set" } else { "not set" }
    );
    println!("  Timeout: {}s", config.provider.timeout_secs);

    println!("\nAdmission:");
    println!(
        "  Max attempts without success: {}",
        config.admission.max_attempts_without_success
    );
    println!("  Min success rate: {}", config.admission.min_success_rate);

    println!("\nFrontier:");
    println!("  Default priority: {}", config.frontier.default_priority);

    println!("\n✓ Configuration is valid");
}

/// Handles the --seed mode: offers each URL to the frontier
fn handle_seed(storage: Arc<dyn Storage>, config: &Config, urls: &[String]) {
    let coordinator = CrawlCoordinator::new(storage, config);

    for url in urls {
        match coordinator.enqueue_default(url) {
            Admission::Enqueued(id) => println!("✓ {} queued (entry {})", url, id),
            Admission::AlreadyVisited => println!("- {} already visited", url),
            Admission::DomainExcluded(domain) => {
                println!("- {} skipped: domain {} excluded", url, domain)
            }
            Admission::InvalidUrl => println!("✗ {} is not a crawlable URL", url),
            Admission::StorageFailure => println!("✗ {} could not be queued", url),
        }
    }

    println!("\nFrontier size: {}", coordinator.frontier().len());
}

/// Handles the --lookup mode: fetches and catalogs one movie
async fn handle_lookup(
    storage: Arc<dyn Storage>,
    config: &Config,
    title: &str,
) -> anyhow::Result<()> {
    let provider = OmdbProvider::new(&config.provider, &config.user_agent)?;
    let catalog = MovieCatalog::new(storage, Arc::new(provider));

    if catalog.contains(title) {
        println!("- '{}' is already catalogued", title);
        return Ok(());
    }

    match catalog.fetch_external_movie_info(title).await {
        Some(info) => match catalog.add_movie(title, info) {
            Some(id) => println!("✓ '{}' added to catalog (id {})", title, id),
            None => println!("✗ '{}' could not be added", title),
        },
        None => println!("✗ No metadata available for '{}'", title),
    }

    Ok(())
}
