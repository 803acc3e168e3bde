//! HTML field extraction for product pages
//!
//! This module pulls the raw product fields out of a page:
//! - Title, description (element text)
//! - Price (attribute value)
//! - Image URLs and swatch URLs (attribute lists, in document order)
//!
//! All field selectors are scoped to the first element matching the base
//! selector. A page without a base element is an extraction failure.

use crate::catalog::RawPageFields;
use crate::config::SelectorConfig;
use scraper::{ElementRef, Html, Selector};

/// Extracts raw product fields from an HTML page
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `selectors` - CSS selectors and attribute names for each field
///
/// # Returns
///
/// * `Ok(RawPageFields)` - Fields found under the base element
/// * `Err(String)` - A selector failed to parse or no base element exists
///
/// # Example
///
/// ```
/// use swatch_ripple::config::SelectorConfig;
/// use swatch_ripple::crawler::extract_fields;
///
/// let html = r#"<div class="ecom-sections">
///     <h1 class="ecom-product__heading">Select Gas Range (SGR-30)</h1>
///     <span data-price="99900"></span>
///     <a swatch-url="/products/select-36"></a>
/// </div>"#;
/// let fields = extract_fields(html, &SelectorConfig::default()).unwrap();
/// assert_eq!(fields.title.as_deref(), Some("Select Gas Range (SGR-30)"));
/// assert_eq!(fields.price.as_deref(), Some("99900"));
/// assert_eq!(fields.variant_urls, vec!["/products/select-36".to_string()]);
/// ```
pub fn extract_fields(html: &str, selectors: &SelectorConfig) -> Result<RawPageFields, String> {
    let document = Html::parse_document(html);

    let base_selector = parse_selector(&selectors.base)?;
    let base = document
        .select(&base_selector)
        .next()
        .ok_or_else(|| format!("no element matches base selector '{}'", selectors.base))?;

    let title = first_text(&base, &parse_selector(&selectors.title)?).filter(|s| !s.is_empty());

    let price = base
        .select(&parse_selector(&selectors.price)?)
        .find_map(|element| element.value().attr(&selectors.price_attribute))
        .map(|value| value.trim().to_string());

    let description =
        first_text(&base, &parse_selector(&selectors.description)?).unwrap_or_default();

    let images = attribute_list(
        &base,
        &parse_selector(&selectors.images)?,
        &selectors.image_attribute,
    );

    let variant_urls = attribute_list(
        &base,
        &parse_selector(&selectors.variant_urls)?,
        &selectors.variant_url_attribute,
    );

    Ok(RawPageFields {
        title,
        price,
        description,
        images,
        variant_urls,
    })
}

fn parse_selector(selector: &str) -> Result<Selector, String> {
    Selector::parse(selector).map_err(|e| format!("invalid selector '{}': {}", selector, e))
}

/// Text of the first matching element with whitespace runs collapsed
fn first_text(scope: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(|element| {
        element
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Non-empty attribute values of every matching element, in document order
fn attribute_list(scope: &ElementRef<'_>, selector: &Selector, attribute: &str) -> Vec<String> {
    scope
        .select(selector)
        .filter_map(|element| element.value().attr(attribute))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_page(body: &str) -> String {
        format!(
            r#"<html><head><title>Store</title></head><body>
            <header><a swatch-url="/products/outside-base"></a></header>
            <div class="ecom-sections">{}</div>
            </body></html>"#,
            body
        )
    }

    #[test]
    fn test_extract_all_fields() {
        let html = product_page(
            r#"
            <h1 class="ecom-product__heading">
                30 in. Paramount Gas Range
                (SGRZ-30)
            </h1>
            <span class="price" data-price="459900">$4,599.00</span>
            <div class="ecom-html-des"><p>Professional  range.</p></div>
            <div class="ecom-product-thumbnail"><img src="//cdn/a.jpg"><img src="//cdn/b.jpg"></div>
            <div class="ecom-splide-slide"><img src="//cdn/c.jpg"></div>
            <a swatch-url="/products/p-36">36</a>
            <a swatch-url="/products/p-48">48</a>
            "#,
        );

        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(
            fields.title.as_deref(),
            Some("30 in. Paramount Gas Range (SGRZ-30)")
        );
        assert_eq!(fields.price.as_deref(), Some("459900"));
        assert_eq!(fields.description, "Professional range.");
        assert_eq!(fields.images, vec!["//cdn/a.jpg", "//cdn/b.jpg", "//cdn/c.jpg"]);
        assert_eq!(fields.variant_urls, vec!["/products/p-36", "/products/p-48"]);
    }

    #[test]
    fn test_missing_base_element() {
        let html = r#"<html><body><h1 class="ecom-product__heading">T</h1></body></html>"#;
        let result = extract_fields(html, &SelectorConfig::default());
        assert!(result.unwrap_err().contains("base selector"));
    }

    #[test]
    fn test_missing_fields_default() {
        let html = product_page("<p>nothing useful</p>");
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();

        assert_eq!(fields, RawPageFields::default());
    }

    #[test]
    fn test_blank_title_is_absent() {
        let html = product_page(r#"<h1 class="ecom-product__heading">   </h1>"#);
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(fields.title, None);
    }

    #[test]
    fn test_links_outside_base_ignored() {
        let html = product_page(r#"<a swatch-url="/products/inside"></a>"#);
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(fields.variant_urls, vec!["/products/inside"]);
    }

    #[test]
    fn test_empty_attributes_skipped() {
        let html = product_page(
            r#"<a swatch-url=""></a><a swatch-url="  "></a><a swatch-url="/products/x"></a>"#,
        );
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(fields.variant_urls, vec!["/products/x"]);
    }

    #[test]
    fn test_duplicate_links_preserved() {
        // Deduplication happens during discovery, not extraction
        let html = product_page(r#"<a swatch-url="/products/x"></a><a swatch-url="/products/x"></a>"#);
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(fields.variant_urls.len(), 2);
    }

    #[test]
    fn test_price_from_first_element_with_attribute() {
        let html = product_page(r#"<span data-price="1200"></span><span data-price="9999"></span>"#);
        let fields = extract_fields(&html, &SelectorConfig::default()).unwrap();
        assert_eq!(fields.price.as_deref(), Some("1200"));
    }

    #[test]
    fn test_custom_selectors() {
        let selectors = SelectorConfig {
            base: "main".to_string(),
            title: "h2".to_string(),
            price: "meta[itemprop=price]".to_string(),
            price_attribute: "content".to_string(),
            description: ".desc".to_string(),
            images: "img.gallery".to_string(),
            image_attribute: "data-src".to_string(),
            variant_urls: "a.swatch".to_string(),
            variant_url_attribute: "href".to_string(),
        };
        let html = r#"<main>
            <h2>Classic Range</h2>
            <meta itemprop="price" content="1500">
            <div class="desc">Nice</div>
            <img class="gallery" data-src="/img/1.png">
            <a class="swatch" href="/products/classic-36"></a>
        </main>"#;

        let fields = extract_fields(html, &selectors).unwrap();
        assert_eq!(fields.title.as_deref(), Some("Classic Range"));
        assert_eq!(fields.price.as_deref(), Some("1500"));
        assert_eq!(fields.description, "Nice");
        assert_eq!(fields.images, vec!["/img/1.png"]);
        assert_eq!(fields.variant_urls, vec!["/products/classic-36"]);
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = SelectorConfig {
            title: "[[".to_string(),
            ..SelectorConfig::default()
        };
        let html = product_page("");
        assert!(extract_fields(&html, &selectors).is_err());
    }
}
