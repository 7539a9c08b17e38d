use crate::record::Category;
use serde::Deserialize;

/// Browser User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_CSV_PATH: &str = "products.csv";

pub const DEFAULT_IMAGE_DIR: &str = "product_images";

/// Main configuration structure for Lakai-Scrape
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub output: OutputConfig,

    /// Categories in walk order
    #[serde(rename = "category", default = "default_categories")]
    pub categories: Vec<CategoryEntry>,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Root of the downloaded image tree
    #[serde(rename = "image-dir", default = "default_image_dir")]
    pub image_dir: String,
}

/// A category and its listing page
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub name: Category,
    pub url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            output: OutputConfig::default(),
            categories: default_categories(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            image_dir: default_image_dir(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_csv_path() -> String {
    DEFAULT_CSV_PATH.to_string()
}

fn default_image_dir() -> String {
    DEFAULT_IMAGE_DIR.to_string()
}

fn default_categories() -> Vec<CategoryEntry> {
    vec![
        CategoryEntry {
            name: Category::Shoes,
            url: "https://www.lakai.com/collections/shoes".to_string(),
        },
        CategoryEntry {
            name: Category::Apparel,
            url: "https://www.lakai.com/collections/apparel".to_string(),
        },
    ]
}
