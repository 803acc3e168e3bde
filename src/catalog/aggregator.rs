//! Series-bucketed variant accumulator
//!
//! The aggregator is created empty at the start of a run, mutated only by
//! [`CatalogAggregator::ingest`], and read once at the end to build the
//! output document. It performs no deduplication; that is the frontier's job.

use crate::catalog::types::{
    CatalogDocument, RangeSeries, RawPageFields, ScrapeMetadata, SeriesGroup, VariantRecord,
};
use crate::extract::{detect_series, extract_sku, extract_variant_details, Series};
use crate::url::join_origin;
use chrono::{DateTime, Local};

/// Title used when a page yields no title at all
pub const MISSING_TITLE: &str = "N/A";

/// Accumulates variant records keyed by series
#[derive(Debug, Clone)]
pub struct CatalogAggregator {
    origin: String,
    buckets: [Vec<VariantRecord>; 4],
}

impl CatalogAggregator {
    /// Creates an empty aggregator with every series bucket present
    ///
    /// # Arguments
    ///
    /// * `origin` - Fixed origin prefixed to page-relative paths
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            buckets: Default::default(),
        }
    }

    /// Builds a variant record from raw page fields and files it under its series
    ///
    /// Malformed input never fails: a missing title becomes `"N/A"`, an
    /// unparseable price becomes `0`.
    ///
    /// # Arguments
    ///
    /// * `path` - Page-relative path of the fetched page
    /// * `fields` - Raw fields extracted from the page
    ///
    /// # Returns
    ///
    /// The series the variant was filed under
    pub fn ingest(&mut self, path: &str, fields: &RawPageFields) -> Series {
        let title = fields.title.as_deref().unwrap_or(MISSING_TITLE);
        let series = detect_series(title);

        let record = VariantRecord {
            sku: extract_sku(title),
            title: title.to_string(),
            price: coerce_price(fields.price.as_deref()),
            url: join_origin(&self.origin, path),
            images: fields.images.clone(),
            description: fields.description.clone(),
            details: extract_variant_details(title),
        };

        self.buckets[series.index()].push(record);
        series
    }

    /// Returns the variants filed under a series, in insertion order
    pub fn variants(&self, series: Series) -> &[VariantRecord] {
        &self.buckets[series.index()]
    }

    /// Returns the number of variants across all series
    pub fn total_variants(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Builds the output document stamped with the current local time
    pub fn build_document(&self) -> CatalogDocument {
        self.build_document_at(Local::now())
    }

    /// Builds the output document with an explicit generation time
    ///
    /// Empty series are left out. Variants in each group are stably sorted
    /// by `(size, fuel_type, accent)` as plain strings, so sizes compare
    /// lexically ("8 Inch" sorts after "48 Inch").
    pub fn build_document_at(&self, timestamp: DateTime<Local>) -> CatalogDocument {
        let groups: Vec<SeriesGroup> = Series::ALL
            .iter()
            .zip(self.buckets.iter())
            .filter(|(_, variants)| !variants.is_empty())
            .map(|(series, variants)| {
                let mut variants = variants.clone();
                variants.sort_by(|a, b| {
                    (&a.details.size, &a.details.fuel_type, &a.details.accent).cmp(&(
                        &b.details.size,
                        &b.details.fuel_type,
                        &b.details.accent,
                    ))
                });

                SeriesGroup {
                    series: *series,
                    series_name: series.display_name().to_string(),
                    total_variants: variants.len(),
                    variants,
                }
            })
            .collect();

        CatalogDocument {
            scrape_metadata: ScrapeMetadata {
                timestamp: timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                total_series: groups.len(),
                total_variants: groups.iter().map(|group| group.total_variants).sum(),
            },
            range_series: RangeSeries(groups),
        }
    }
}

/// Coerces a raw price into non-negative integer minor units
///
/// Integers parse directly, decimals are truncated toward zero, and
/// anything negative, missing or unparseable yields `0`.
pub fn coerce_price(raw: Option<&str>) -> u64 {
    let raw = raw.map(str::trim).unwrap_or("");

    if let Ok(value) = raw.parse::<i64>() {
        return u64::try_from(value).unwrap_or(0);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u64,
        _ => 0,
    }
}
