//! Swatch-Ripple main entry point
//!
//! This is the command-line interface for the Swatch-Ripple catalog mapper.

use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use swatch_ripple::config::{load_config_with_hash, validate, Config, FetchMode};
use swatch_ripple::crawler::crawl;
use swatch_ripple::output::{print_summary, write_document};
use tracing_subscriber::EnvFilter;

/// Swatch-Ripple: a bounded variant-catalog mapper
///
/// Swatch-Ripple starts at one product page, follows its swatch links to
/// sibling variants, and writes a catalog grouped by product series.
#[derive(Parser, Debug)]
#[command(name = "swatch-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A bounded variant-catalog mapper", long_about = None)]
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

    /// Override the start URL from the config file
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Override the maximum number of pages to fetch
    #[arg(long, value_name = "N")]
    max_urls: Option<u32>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("swatch_ripple=info,warn"),
            1 => EnvFilter::new("swatch_ripple=debug,info"),
            2 => EnvFilter::new("swatch_ripple=trace,debug"),
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

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(start_url) = &cli.start_url {
        tracing::info!("Overriding start URL: {}", start_url);
        config.crawler.start_url = start_url.clone();
    }
    if let Some(max_urls) = cli.max_urls {
        tracing::info!("Overriding max URLs: {}", max_urls);
        config.crawler.max_urls = max_urls;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.directory = output_dir.clone();
    }

    validate(config)?;
    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Swatch-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Origin: {}", config.crawler.origin);
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Max URLs: {}", config.crawler.max_urls);

    println!("\nFetch:");
    match config.fetch.mode {
        FetchMode::Http => println!("  Mode: http"),
        FetchMode::Render => println!(
            "  Mode: render ({})",
            config.fetch.render_endpoint.as_deref().unwrap_or("-")
        ),
    }
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Timeout: {}s", config.fetch.timeout_secs);

    println!("\nSelectors:");
    println!("  Base: {}", config.selectors.base);
    println!("  Title: {}", config.selectors.title);
    println!(
        "  Swatch URLs: {} [{}]",
        config.selectors.variant_urls, config.selectors.variant_url_attribute
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  File prefix: {}", config.output.file_prefix);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would visit at most {} pages starting from {}",
        config.crawler.max_urls, config.crawler.start_url
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} from {} (max {} URLs)",
        config.crawler.origin,
        config.crawler.start_url,
        config.crawler.max_urls
    );

    let document = match crawl(config).await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if document.scrape_metadata.total_variants == 0 {
        tracing::warn!("No variants were collected");
    }

    let path = write_document(
        &document,
        Path::new(&config.output.directory),
        &config.output.file_prefix,
        Local::now(),
    )?;

    if !quiet {
        print_summary(&document, Some(&path));
    }

    Ok(())
}
