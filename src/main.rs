//! Lakai-Scrape main entry point
//!
//! This is the command-line interface for the Lakai-Scrape catalog scraper.

use clap::Parser;
use lakai_scrape::config::{load_config_with_hash, Config};
use lakai_scrape::pipeline::{self, Stages};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lakai-Scrape: scrape the Lakai shoe and apparel catalog
///
/// Walks each category listing, writes one CSV row per product and then
/// downloads the product images into a per-category folder tree.
#[derive(Parser, Debug)]
#[command(name = "lakai-scrape")]
#[command(version = "1.0.0")]
#[command(about = "Scrape the Lakai catalog into CSV and images", long_about = None)]
struct Cli {
    /// Optional TOML file overriding the built-in categories and output paths
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Scrape and write the CSV, but do not download images
    #[arg(long, conflicts_with = "images_only")]
    skip_images: bool,

    /// Download images from an existing CSV without scraping
    #[arg(long, conflicts_with = "skip_images")]
    images_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let stages = if cli.images_only {
        Stages::ImagesOnly
    } else if cli.skip_images {
        Stages::SkipImages
    } else {
        Stages::All
    };

    tracing::info!("Starting scraper...");
    match pipeline::run(&config, stages).await {
        Ok(summary) => {
            tracing::debug!("Run finished: {:?}", summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lakai_scrape=info,warn"),
            1 => EnvFilter::new("lakai_scrape=debug,info"),
            2 => EnvFilter::new("lakai_scrape=trace,debug"),
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
