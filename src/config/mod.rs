//! Configuration module for Lakai-Scrape
//!
//! This module handles the built-in defaults and the optional TOML override file.
//!
//! # Example
//!
//! ```no_run
//! use lakai_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Writing products to: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CategoryEntry, Config, OutputConfig, DEFAULT_CSV_PATH, DEFAULT_IMAGE_DIR, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
