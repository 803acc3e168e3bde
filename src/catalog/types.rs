//! Catalog record and document types

use crate::extract::{Series, VariantDetails};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Untyped field bag returned by a fetch adapter for a single page
///
/// Produced per fetch and consumed immediately by the aggregator and the
/// frontier. All values are as extracted, with no coercion applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPageFields {
    /// Product title text (absent if the page had no title element)
    pub title: Option<String>,

    /// Raw price value, in minor currency units
    pub price: Option<String>,

    /// Product description text
    pub description: String,

    /// Image URLs in page order
    pub images: Vec<String>,

    /// Page-relative swatch URLs pointing at sibling variants
    pub variant_urls: Vec<String>,
}

/// A single purchasable configuration of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// SKU parsed once from the title; empty if unparseable
    pub sku: String,

    pub title: String,

    /// Price in minor currency units
    pub price: u64,

    /// Absolute page URL
    pub url: String,

    pub images: Vec<String>,

    pub description: String,

    #[serde(flatten)]
    pub details: VariantDetails,
}

/// Top-level metadata for a catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeMetadata {
    /// Generation time, ISO-8601
    pub timestamp: String,

    /// Number of non-empty series groups
    pub total_series: usize,

    /// Number of variants across all groups
    pub total_variants: usize,
}

/// All variants belonging to one series, sorted for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesGroup {
    #[serde(skip)]
    pub series: Series,

    pub series_name: String,

    pub total_variants: usize,

    pub variants: Vec<VariantRecord>,
}

/// Non-empty series groups in series priority order
///
/// Serializes as a JSON object keyed by series key, preserving that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSeries(pub(crate) Vec<SeriesGroup>);

impl RangeSeries {
    /// Returns the group for a series, if it has any variants
    pub fn get(&self, series: Series) -> Option<&SeriesGroup> {
        self.0.iter().find(|group| group.series == series)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesGroup> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RangeSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(group.series.key(), group)?;
        }
        map.end()
    }
}

/// The final structured catalog produced by a crawl run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDocument {
    pub scrape_metadata: ScrapeMetadata,
    pub range_series: RangeSeries,
}

impl CatalogDocument {
    /// Iterates over every variant in group order
    pub fn variants(&self) -> impl Iterator<Item = &VariantRecord> {
        self.range_series.iter().flat_map(|group| group.variants.iter())
    }
}
