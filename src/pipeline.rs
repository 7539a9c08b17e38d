//! Stage orchestration: walk → write → download
//!
//! The stages share only the CSV file. The download stage always re-reads it
//! from disk, so `Stages::ImagesOnly` can be run on its own later.

use crate::catalog::{build_http_client, walk_catalog, LakaiExtractor, ProductExtractor};
use crate::config::Config;
use crate::output::{download_images_from_csv, save_to_csv, DownloadReport};
use crate::Result;
use reqwest::Client;
use std::path::Path;

/// Which stages to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stages {
    /// Scrape, write the CSV, then download images
    #[default]
    All,
    /// Scrape and write the CSV only
    SkipImages,
    /// Download images from an existing CSV
    ImagesOnly,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records written to the CSV (0 when scraping was skipped or found nothing)
    pub products: usize,

    /// Present when the download stage ran
    pub images: Option<DownloadReport>,
}

/// Runs the requested stages with the Lakai extractor
pub async fn run(config: &Config, stages: Stages) -> Result<RunSummary> {
    let client = build_http_client(&config.user_agent)?;
    let extractor = LakaiExtractor::new()?;

    run_with(&client, &extractor, config, stages).await
}

/// Runs the requested stages with an explicit client and extractor
pub async fn run_with<E: ProductExtractor>(
    client: &Client,
    extractor: &E,
    config: &Config,
    stages: Stages,
) -> Result<RunSummary> {
    let csv_path = Path::new(&config.output.csv_path);
    let image_dir = Path::new(&config.output.image_dir);
    let mut summary = RunSummary::default();

    if stages != Stages::ImagesOnly {
        let products = walk_catalog(client, &config.categories, extractor).await;

        if products.is_empty() {
            tracing::info!("No products found.");
            return Ok(summary);
        }

        summary.products = save_to_csv(&products, csv_path)?;
        tracing::info!(
            "Scraped {} products. Data saved to {}",
            summary.products,
            csv_path.display()
        );
    }

    if stages != Stages::SkipImages {
        let report = download_images_from_csv(client, csv_path, image_dir).await?;
        tracing::info!(
            "Downloaded {} images for {} products ({} failed)",
            report.downloaded,
            report.rows,
            report.failed
        );
        summary.images = Some(report);
    }

    Ok(summary)
}
