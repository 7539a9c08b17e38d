//! CSV file contract shared by the writer and the image fetcher

use crate::record::{Category, ProductRecord};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header row, in column order
pub const COLUMNS: [&str; 8] = [
    "Category",
    "Name",
    "Color",
    "Price",
    "Image URLs",
    "Description",
    "Product URL",
    "Unique Name",
];

/// Joins the image URLs inside one cell
pub const IMAGE_URL_SEPARATOR: &str = ", ";

/// One CSV row; field order is column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Image URLs")]
    pub image_urls: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Product URL")]
    pub product_url: String,
    #[serde(rename = "Unique Name")]
    pub unique_name: String,
}

impl CsvRow {
    /// Splits the image cell back into URLs; an empty cell has none
    pub fn image_urls(&self) -> Vec<String> {
        self.image_urls
            .split(IMAGE_URL_SEPARATOR)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&ProductRecord> for CsvRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            category: record.category,
            name: record.name.clone(),
            color: record.color.clone(),
            price: record.price.clone(),
            image_urls: record.image_urls.join(IMAGE_URL_SEPARATOR),
            description: record.description.clone(),
            product_url: record.product_url.clone(),
            unique_name: record.slug.clone(),
        }
    }
}

/// Writes all records to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(ScrapeError)` - Failed to create or write the file
pub fn save_to_csv(records: &[ProductRecord], path: &Path) -> Result<usize> {
    // headers are written explicitly so an empty slice still gets a header row
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;

    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Reads every row of a file written by [`save_to_csv`]
///
/// Rows that fail to deserialize are returned as errors so the caller can
/// skip them individually.
pub fn read_rows(path: &Path) -> Result<Vec<std::result::Result<CsvRow, csv::Error>>> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader.deserialize().collect())
}
