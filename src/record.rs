//! The product record produced by the catalog walk

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category; its lowercase label names both the CSV value and the image folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shoes,
    Apparel,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shoes => "shoes",
            Category::Apparel => "apparel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub category: Category,
    pub name: String,

    pub color: String,

    /// Display text as shown on the page (e.g. "$65.00"), never parsed
    pub price: String,

    /// Absolute image URLs in gallery order
    pub image_urls: Vec<String>,
    pub description: String,
    pub product_url: String,

    /// Path segment after `/products/`, used as the image file stem
    pub slug: String,
}
