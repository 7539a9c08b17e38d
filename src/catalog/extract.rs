//! Field extraction for listing and detail pages
//!
//! The walk only talks to [`ProductExtractor`]: raw HTML in, product links or a
//! [`ProductRecord`] out. [`LakaiExtractor`] holds the selectors for the
//! lakai.com Shopify theme.

use crate::record::{Category, ProductRecord};
use crate::{ExtractError, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const PRODUCT_LINK: &str = "a.flex.flex-col.gap-2";
const NAME_PRICE: &str = "div#name-price";
const HEADING: &str = "h1";
const SELECTED_VARIANT: &str = "div#selected-variant";
const SPAN: &str = "span";
const IMAGE_GALLERY: &str = "div#desktop-image-gallery";
const GALLERY_IMAGE: &str = "img.w-full.object-fit";
const DESCRIPTION: &str = "div#accordion_piece_yqU6pQ_content";
const PARAGRAPH: &str = "p";

/// What the walk already knows about a product before its page is parsed
#[derive(Debug, Clone, Copy)]
pub struct ProductContext<'a> {
    pub category: Category,

    /// Absolute URL of the detail page
    pub product_url: &'a Url,

    /// Listing page URL; relative image sources are resolved against it
    pub base_url: &'a Url,

    pub slug: &'a str,
}

/// Site-specific extraction of product links and product records
pub trait ProductExtractor {
    /// Returns the product hrefs on a listing page, in document order
    fn product_links(&self, listing_html: &str) -> Vec<String>;

    /// Builds a record from a detail page
    fn extract(
        &self,
        detail_html: &str,
        context: &ProductContext<'_>,
    ) -> Result<ProductRecord, ExtractError>;
}

/// Extractor for lakai.com listing and detail pages
#[derive(Debug, Clone)]
pub struct LakaiExtractor {
    product_link: Selector,
    name_price: Selector,
    heading: Selector,
    selected_variant: Selector,
    span: Selector,
    image_gallery: Selector,
    gallery_image: Selector,
    description: Selector,
    paragraph: Selector,
}

impl LakaiExtractor {
    /// Compiles the fixed selectors
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            product_link: parse_selector(PRODUCT_LINK)?,
            name_price: parse_selector(NAME_PRICE)?,
            heading: parse_selector(HEADING)?,
            selected_variant: parse_selector(SELECTED_VARIANT)?,
            span: parse_selector(SPAN)?,
            image_gallery: parse_selector(IMAGE_GALLERY)?,
            gallery_image: parse_selector(GALLERY_IMAGE)?,
            description: parse_selector(DESCRIPTION)?,
            paragraph: parse_selector(PARAGRAPH)?,
        })
    }
}

impl ProductExtractor for LakaiExtractor {
    fn product_links(&self, listing_html: &str) -> Vec<String> {
        let document = Html::parse_document(listing_html);
        let mut links = Vec::new();

        for anchor in document.select(&self.product_link) {
            match anchor.value().attr("href") {
                Some(href) => links.push(href.to_string()),
                None => tracing::warn!("Error parsing product: product link without href"),
            }
        }

        links
    }

    fn extract(
        &self,
        detail_html: &str,
        context: &ProductContext<'_>,
    ) -> Result<ProductRecord, ExtractError> {
        let document = Html::parse_document(detail_html);

        let name_price = first(&document, &self.name_price, NAME_PRICE)?;
        let headings = collect_at_least(name_price, &self.heading, HEADING, 2)?;
        let name = stripped_text(headings[0]);
        let price = stripped_text(headings[1]);

        let variant = first(&document, &self.selected_variant, SELECTED_VARIANT)?;
        let spans = collect_at_least(variant, &self.span, SPAN, 2)?;
        let color = stripped_text(spans[1]);

        let gallery = first(&document, &self.image_gallery, IMAGE_GALLERY)?;
        let image_urls = gallery
            .select(&self.gallery_image)
            .map(|img| {
                let src = img
                    .value()
                    .attr("src")
                    .ok_or(ExtractError::MissingAttribute {
                        selector: GALLERY_IMAGE,
                        attribute: "src",
                    })?;
                resolve(context.base_url, src).map(|url| url.to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let description_div = first(&document, &self.description, DESCRIPTION)?;
        let description = description_div
            .select(&self.paragraph)
            .map(stripped_text)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ProductRecord {
            category: context.category,
            name,
            color,
            price,
            image_urls,
            description,
            product_url: context.product_url.to_string(),
            slug: context.slug.to_string(),
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

fn first<'a>(
    document: &'a Html,
    selector: &Selector,
    name: &'static str,
) -> Result<ElementRef<'a>, ExtractError> {
    document
        .select(selector)
        .next()
        .ok_or(ExtractError::MissingElement(name))
}

fn collect_at_least<'a>(
    parent: ElementRef<'a>,
    selector: &Selector,
    name: &'static str,
    expected: usize,
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let elements: Vec<_> = parent.select(selector).collect();
    if elements.len() < expected {
        return Err(ExtractError::TooFewElements {
            selector: name,
            expected,
            found: elements.len(),
        });
    }
    Ok(elements)
}

/// Text of an element with each text node trimmed and empty nodes dropped
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolves an href against `base`, like a browser would
pub(crate) fn resolve(base: &Url, href: &str) -> Result<Url, ExtractError> {
    base.join(href.trim()).map_err(|e| ExtractError::InvalidUrl {
        href: href.to_string(),
        message: e.to_string(),
    })
}
