//! Image download stage
//!
//! Driven entirely by the CSV file so it can be re-run without scraping again.

use crate::output::table::read_rows;
use crate::record::Category;
use crate::{Result, ScrapeError};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Size of the buffered writes to each image file
const IMAGE_CHUNK_SIZE: usize = 1024;

/// Counts for the closing log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Rows read from the CSV, including skipped ones
    pub rows: usize,
    pub downloaded: usize,
    pub failed: usize,
}

/// Location of the `index`-th (1-based) image of a product
pub fn image_path(image_dir: &Path, category: Category, slug: &str, index: usize) -> PathBuf {
    image_dir
        .join(category.as_str())
        .join(format!("{}_{}.jpg", slug, index))
}

/// Downloads the images of every row in `csv_path` into `image_dir`
///
/// Each failure is logged and skipped; nothing is retried. Only a CSV file
/// that cannot be opened or an image root that cannot be created is returned
/// as an error.
pub async fn download_images_from_csv(
    client: &Client,
    csv_path: &Path,
    image_dir: &Path,
) -> Result<DownloadReport> {
    tokio::fs::create_dir_all(image_dir).await?;

    let rows = read_rows(csv_path)?;
    let mut report = DownloadReport {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping unreadable row in {}: {}", csv_path.display(), e);
                continue;
            }
        };

        let category_dir = image_dir.join(row.category.as_str());
        if let Err(e) = tokio::fs::create_dir_all(&category_dir).await {
            tracing::warn!("Cannot create {}: {}", category_dir.display(), e);
            continue;
        }

        for (idx, image_url) in row.image_urls().iter().enumerate() {
            let path = image_path(image_dir, row.category, &row.unique_name, idx + 1);

            match download_image(client, image_url, &path).await {
                Ok(bytes) => {
                    tracing::info!("Downloaded: {}", path.display());
                    tracing::trace!("{} bytes from {}", bytes, image_url);
                    report.downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Error downloading {}: {}", image_url, e);
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

/// Streams one image to `path`
///
/// A partially written file is removed when the transfer fails.
///
/// # Returns
///
/// * `Ok(u64)` - Bytes written
/// * `Err(ScrapeError)` - Request, status, or filesystem failure
pub async fn download_image(client: &Client, url: &str, path: &Path) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let result = stream_to_file(response, url, path).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn stream_to_file(response: reqwest::Response, url: &str, path: &Path) -> Result<u64> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::with_capacity(IMAGE_CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;
        writer.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await?;

    Ok(bytes_written)
}
