//! Console summary of a catalog document

use crate::catalog::{CatalogDocument, VariantRecord};
use std::path::Path;

/// Number of variants listed per series before the remainder is elided
pub const PREVIEW_VARIANTS: usize = 3;

/// Formats a price in minor units as dollars with two decimals
fn format_price(minor: u64) -> String {
    format!("${}.{:02}", minor / 100, minor % 100)
}

fn format_variant(variant: &VariantRecord) -> String {
    format!(
        "  - {} {} - {} ({})",
        variant.details.size,
        variant.details.fuel_type,
        format_price(variant.price),
        variant.sku
    )
}

/// Formats the per-series summary printed after a run
///
/// Series appear in priority order. Each lists its first
/// [`PREVIEW_VARIANTS`] variants followed by a count of the rest.
///
/// # Arguments
///
/// * `document` - The catalog document
/// * `output_path` - Where the document was written, if it was
///
/// # Returns
///
/// The formatted summary text
pub fn format_summary(document: &CatalogDocument, output_path: Option<&Path>) -> String {
    let mut out = String::new();

    out.push_str("STRUCTURED RESULTS:\n");
    if let Some(path) = output_path {
        out.push_str(&format!("Data saved to: {}\n", path.display()));
    }
    out.push_str(&format!(
        "{} variants across {} series\n",
        document.scrape_metadata.total_variants, document.scrape_metadata.total_series
    ));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for group in document.range_series.iter() {
        out.push_str(&format!(
            "\n{} SERIES: {} variants\n",
            group.series.key().to_uppercase(),
            group.total_variants
        ));

        for variant in group.variants.iter().take(PREVIEW_VARIANTS) {
            out.push_str(&format_variant(variant));
            out.push('\n');
        }

        if group.total_variants > PREVIEW_VARIANTS {
            out.push_str(&format!(
                "  ... and {} more variants\n",
                group.total_variants - PREVIEW_VARIANTS
            ));
        }
    }

    out
}

/// Prints the summary to standard output
pub fn print_summary(document: &CatalogDocument, output_path: Option<&Path>) {
    print!("{}", format_summary(document, output_path));
}
