//! Output module for the two on-disk artifacts
//!
//! This module handles:
//! - Writing product records to the CSV file and reading them back
//! - Downloading product images into the per-category image tree

mod images;
mod table;

pub use images::{download_image, download_images_from_csv, image_path, DownloadReport};
pub use table::{read_rows, save_to_csv, CsvRow, COLUMNS, IMAGE_URL_SEPARATOR};
