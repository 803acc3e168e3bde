//! Catalog aggregation
//!
//! This module accumulates classified variant records per series and builds
//! the final grouped, sorted catalog document.

mod aggregator;
mod types;

pub use aggregator::{coerce_price, CatalogAggregator, MISSING_TITLE};
pub use types::{CatalogDocument, RangeSeries, RawPageFields, ScrapeMetadata, SeriesGroup, VariantRecord};
