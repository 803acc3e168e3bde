//! Rendering-service fetch adapter
//!
//! Swatch URLs only appear after client-side interaction, so this adapter
//! hands each page to an external browser-rendering service. The service
//! loads the page, runs the configured script, waits for the readiness
//! condition and applies a CSS extraction schema built from
//! [`SelectorConfig`]. Its reply carries the extraction as a JSON string.

use crate::catalog::RawPageFields;
use crate::config::{FetchConfig, SelectorConfig};
use crate::crawler::fetcher::{build_http_client, FetchError, PageFetcher};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

/// Reply envelope from the rendering service
#[derive(Debug, Deserialize)]
struct RenderResponse {
    success: bool,

    #[serde(default)]
    extracted_content: Option<String>,

    #[serde(default)]
    error_message: Option<String>,
}

/// One extracted object; the first one describes the page
#[derive(Debug, Deserialize)]
struct ExtractedPage {
    #[serde(default)]
    title: Option<String>,

    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    images: Vec<LinkEntry>,

    #[serde(default)]
    variant_urls: Vec<LinkEntry>,
}

/// List entries arrive either as `{"url": ...}` objects or bare strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    Plain(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl LinkEntry {
    fn into_url(self) -> Option<String> {
        let url = match self {
            Self::Plain(url) => Some(url),
            Self::Object { url } => url,
        }?;
        let url = url.trim();
        (!url.is_empty()).then(|| url.to_string())
    }
}

/// Accepts prices as JSON strings or numbers
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl From<ExtractedPage> for RawPageFields {
    fn from(page: ExtractedPage) -> Self {
        Self {
            title: page
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            price: page.price,
            description: page.description.unwrap_or_default(),
            images: page.images.into_iter().filter_map(LinkEntry::into_url).collect(),
            variant_urls: page
                .variant_urls
                .into_iter()
                .filter_map(LinkEntry::into_url)
                .collect(),
        }
    }
}

/// Parses the service's `extracted_content` string into page fields
///
/// # Returns
///
/// * `Ok(RawPageFields)` - Fields from the first extracted object
/// * `Err(String)` - Content is not a JSON array of objects, or is empty
pub fn parse_extracted_content(content: &str) -> Result<RawPageFields, String> {
    let pages: Vec<ExtractedPage> =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

    pages
        .into_iter()
        .next()
        .map(RawPageFields::from)
        .ok_or_else(|| "extraction returned no objects".to_string())
}

/// Fetches pages through an external browser-rendering service
pub struct RenderServiceFetcher {
    client: Client,
    endpoint: String,
    options: Value,
}

impl RenderServiceFetcher {
    /// Creates a fetcher posting to `endpoint`
    ///
    /// # Arguments
    ///
    /// * `endpoint` - URL of the rendering service's crawl endpoint
    /// * `config` - Fetch configuration (user agent, waits, script)
    /// * `selectors` - Selectors used to build the extraction schema
    pub fn new(
        endpoint: impl Into<String>,
        config: &FetchConfig,
        selectors: &SelectorConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: endpoint.into(),
            options: json!({
                "user_agent": config.user_agent,
                "wait_for": config.wait_for,
                "js_code": config.js_code,
                "delay_before_return_html": config.delay_before_return_ms as f64 / 1000.0,
                "schema": extraction_schema(selectors),
            }),
        })
    }

    fn request_body(&self, url: &str) -> Value {
        let mut body = self.options.clone();
        body["url"] = Value::String(url.to_string());
        body
    }
}

/// Builds the CSS extraction schema sent with every render request
pub fn extraction_schema(selectors: &SelectorConfig) -> Value {
    json!({
        "name": "Product Variants",
        "baseSelector": selectors.base,
        "fields": [
            { "name": "title", "selector": selectors.title, "type": "text" },
            {
                "name": "price",
                "selector": selectors.price,
                "type": "attribute",
                "attribute": selectors.price_attribute,
            },
            { "name": "description", "selector": selectors.description, "type": "text" },
            {
                "name": "images",
                "selector": selectors.images,
                "type": "list",
                "fields": [
                    { "name": "url", "type": "attribute", "attribute": selectors.image_attribute }
                ],
            },
            {
                "name": "variant_urls",
                "selector": selectors.variant_urls,
                "type": "list",
                "fields": [
                    { "name": "url", "type": "attribute", "attribute": selectors.variant_url_attribute }
                ],
            },
        ],
    })
}

#[async_trait]
impl PageFetcher for RenderServiceFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPageFields, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(url))
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

        let reply: RenderResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
                url: url.to_string(),
                message: format!("invalid service reply: {}", e),
            })?;

        if !reply.success {
            return Err(FetchError::Render {
                url: url.to_string(),
                message: reply
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
            });
        }

        let content = reply.extracted_content.ok_or_else(|| FetchError::Malformed {
            url: url.to_string(),
            message: "reply has no extracted_content".to_string(),
        })?;

        parse_extracted_content(&content).map_err(|message| FetchError::Malformed {
            url: url.to_string(),
            message,
        })
    }
}
