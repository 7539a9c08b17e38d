//! Sequential walk over category listings and product detail pages

use crate::catalog::extract::{resolve, ProductContext, ProductExtractor};
use crate::catalog::fetcher::{fetch_page, FetchResult};
use crate::catalog::slug::derive_slug;
use crate::config::CategoryEntry;
use crate::record::{Category, ProductRecord};
use crate::ScrapeError;
use reqwest::Client;
use url::Url;

/// Walks every category and returns the records that could be extracted
///
/// Records are ordered by category (as configured), then by their position
/// on the listing page. A category whose listing cannot be fetched is skipped;
/// a product whose page cannot be fetched or parsed is dropped. Neither stops
/// the walk.
pub async fn walk_catalog<E: ProductExtractor>(
    client: &Client,
    categories: &[CategoryEntry],
    extractor: &E,
) -> Vec<ProductRecord> {
    let mut products = Vec::new();

    for entry in categories {
        tracing::info!("Scraping category: {}", entry.name);

        let base_url = match Url::parse(&entry.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid listing URL {}: {}", entry.url, e);
                continue;
            }
        };

        let listing_html = match fetch_page(client, &entry.url).await {
            FetchResult::Success {
                body,
                final_url,
                status_code,
            } => {
                tracing::debug!("Fetched listing {} (HTTP {})", final_url, status_code);
                body
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to fetch {} (HTTP {})", entry.url, status_code);
                tracing::warn!("Failed to retrieve content for {}", entry.name);
                continue;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, error);
                tracing::warn!("Failed to retrieve content for {}", entry.name);
                continue;
            }
        };

        let links = extractor.product_links(&listing_html);
        tracing::debug!("Found {} product links for {}", links.len(), entry.name);

        for href in links {
            match scrape_product(client, extractor, entry.name, &base_url, &href).await {
                Ok(record) => {
                    tracing::debug!("Parsed product {}", record.slug);
                    products.push(record);
                }
                Err(e) => tracing::warn!("Error parsing product: {}", e),
            }
        }
    }

    products
}

/// Fetches and extracts a single product
///
/// Fetch failures and parse failures take the same path out of here.
async fn scrape_product<E: ProductExtractor>(
    client: &Client,
    extractor: &E,
    category: Category,
    base_url: &Url,
    href: &str,
) -> Result<ProductRecord, ScrapeError> {
    let product_url = resolve(base_url, href)?;

    let html = fetch_page(client, product_url.as_str())
        .await
        .into_body(product_url.as_str())?;

    let slug = derive_slug(product_url.as_str())?;

    let context = ProductContext {
        category,
        product_url: &product_url,
        base_url,
        slug: &slug,
    };

    Ok(extractor.extract(&html, &context)?)
}
