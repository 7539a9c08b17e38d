//! Lakai-Scrape: a single-pass catalog scraper
//!
//! This crate walks the category listing pages of an e-commerce site, extracts one
//! record per product detail page, writes the records to a CSV file and then
//! downloads each product's images into a per-category directory tree.

pub mod catalog;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod record;

use thiserror::Error;

/// Main error type for Lakai-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failures while pulling fields out of a product detail page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing element '{0}'")]
    MissingElement(&'static str),

    #[error("expected at least {expected} '{selector}' elements, found {found}")]
    TooFewElements {
        selector: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("element '{selector}' has no '{attribute}' attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("no product slug in URL {0}")]
    MissingSlug(String),

    #[error("cannot resolve '{href}': {message}")]
    InvalidUrl { href: String, message: String },
}

/// Result type alias for Lakai-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{Category, ProductRecord};
