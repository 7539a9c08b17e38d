//! Product slug derivation from detail page URLs

use crate::ExtractError;

const PRODUCTS_SEGMENT: &str = "/products/";

/// Derives the product slug from a product URL
///
/// The slug is everything after the first `/products/`, cut at the first
/// query or fragment marker, with trailing slashes removed.
///
/// # Example
///
/// ```
/// use lakai_scrape::catalog::derive_slug;
///
/// let slug = derive_slug("https://www.lakai.com/products/abc-123?variantId=null").unwrap();
/// assert_eq!(slug, "abc-123");
/// ```
pub fn derive_slug(product_url: &str) -> Result<String, ExtractError> {
    let (_, rest) = product_url
        .split_once(PRODUCTS_SEGMENT)
        .ok_or_else(|| ExtractError::MissingSlug(product_url.to_string()))?;

    let slug = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if slug.is_empty() {
        return Err(ExtractError::MissingSlug(product_url.to_string()));
    }

    Ok(slug.to_string())
}
