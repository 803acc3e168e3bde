//! Fetch adapter boundary
//!
//! This module defines the two-outcome contract the traversal consumes and
//! the plain HTTP implementation of it:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests for product pages
//! - Field extraction from static HTML
//! - Error classification into [`FetchError`]
//!
//! Timeouts and rendering concerns belong here; the traversal only sees
//! `Ok(RawPageFields)` or `Err(FetchError)`.

use crate::catalog::RawPageFields;
use crate::config::{FetchConfig, SelectorConfig};
use crate::crawler::parser::extract_fields;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Reasons a page could not be turned into raw fields
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Extraction failed for {url}: {message}")]
    Extraction { url: String, message: String },

    #[error("Malformed extraction result for {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("Rendering service reported failure for {url}: {message}")]
    Render { url: String, message: String },
}

/// Turns an absolute page URL into raw extracted fields
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches and extracts a single page
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page
    ///
    /// # Returns
    ///
    /// * `Ok(RawPageFields)` - The page's extracted fields
    /// * `Err(FetchError)` - The page could not be fetched or extracted
    async fn fetch(&self, url: &str) -> Result<RawPageFields, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use swatch_ripple::config::FetchConfig;
/// use swatch_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with a plain GET and extracts fields from the static HTML
pub struct HttpFetcher {
    client: Client,
    selectors: SelectorConfig,
}

impl HttpFetcher {
    /// Creates a fetcher from fetch and selector configuration
    pub fn new(config: &FetchConfig, selectors: SelectorConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            selectors,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, selectors: SelectorConfig) -> Self {
        Self { client, selectors }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPageFields, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        extract_fields(&body, &self.selectors).map_err(|message| FetchError::Extraction {
            url: url.to_string(),
            message,
        })
    }
}
