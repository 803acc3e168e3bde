//! Crawler module for catalog traversal and page fetching
//!
//! This module contains the core crawling logic, including:
//! - The fetch adapters (plain HTTP and rendering service)
//! - HTML field extraction scoped to the product section
//! - The frontier with its visit cap
//! - Overall traversal coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod render;

pub use coordinator::{run_crawl, Coordinator, CrawlStats};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::extract_fields;
pub use render::{extraction_schema, parse_extracted_content, RenderServiceFetcher};

use crate::catalog::CatalogDocument;
use crate::config::{Config, FetchMode};
use crate::{ConfigError, SwatchError};

/// Builds the fetch adapter selected by `fetch.mode`
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Box<dyn PageFetcher>)` - The configured adapter
/// * `Err(SwatchError)` - The HTTP client could not be built, or render
///   mode has no endpoint
pub fn build_fetcher(config: &Config) -> Result<Box<dyn PageFetcher>, SwatchError> {
    match config.fetch.mode {
        FetchMode::Http => {
            tracing::debug!("Using direct HTTP fetch adapter");
            Ok(Box::new(HttpFetcher::new(
                &config.fetch,
                config.selectors.clone(),
            )?))
        }
        FetchMode::Render => {
            let endpoint = config.fetch.render_endpoint.as_deref().ok_or_else(|| {
                ConfigError::Validation(
                    "render_endpoint is required in render mode".to_string(),
                )
            })?;
            tracing::debug!("Using rendering service at {}", endpoint);
            Ok(Box::new(RenderServiceFetcher::new(
                endpoint,
                &config.fetch,
                &config.selectors,
            )?))
        }
    }
}

/// Runs a complete crawl and returns the catalog document
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the fetch adapter for the configured mode
/// 2. Seed the frontier with the start URL
/// 3. Fetch pages breadth-first until the queue empties or the cap is hit
/// 4. Group, classify and sort the variants
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CatalogDocument)` - Crawl completed (possibly with skipped pages)
/// * `Err(SwatchError)` - The crawl could not start
pub async fn crawl(config: &Config) -> Result<CatalogDocument, SwatchError> {
    run_crawl(config).await
}
