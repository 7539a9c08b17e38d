//! Catalog module for walking listing pages and product detail pages
//!
//! This module contains the scraping half of the pipeline:
//! - HTTP fetching with the browser User-Agent
//! - Site-specific field extraction behind [`ProductExtractor`]
//! - Slug derivation from product URLs
//! - The sequential category/product walk

mod extract;
mod fetcher;
mod slug;
mod walker;

pub use extract::{LakaiExtractor, ProductContext, ProductExtractor};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use slug::derive_slug;
pub use walker::walk_catalog;
