use serde::Deserialize;

/// Main configuration structure for Swatch-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Fixed origin prefixed to every page-relative path
    pub origin: String,

    /// Page-relative (or same-origin absolute) URL the traversal starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Hard ceiling on distinct pages fetched
    #[serde(rename = "max-urls")]
    pub max_urls: u32,
}

/// How pages are fetched and extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Plain HTTP GET with static HTML extraction
    #[default]
    Http,

    /// Delegate rendering and extraction to an external rendering service
    Render,
}

/// Fetch adapter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub mode: FetchMode,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rendering service endpoint, required in render mode
    #[serde(rename = "render-endpoint", default)]
    pub render_endpoint: Option<String>,

    /// Readiness condition passed to the rendering service
    #[serde(rename = "wait-for", default = "default_wait_for")]
    pub wait_for: Option<String>,

    /// Script the rendering service runs before extraction
    #[serde(rename = "js-code", default = "default_js_code")]
    pub js_code: Option<String>,

    /// Extra settle time before the rendered HTML is captured (milliseconds)
    #[serde(rename = "delay-before-return-ms", default = "default_delay_ms")]
    pub delay_before_return_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            mode: FetchMode::default(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            render_endpoint: None,
            wait_for: default_wait_for(),
            js_code: default_js_code(),
            delay_before_return_ms: default_delay_ms(),
        }
    }
}

/// CSS selectors used to pull fields out of a product page
///
/// Every field selector is scoped to the first element matching `base`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub base: String,
    pub title: String,
    pub price: String,
    #[serde(rename = "price-attribute")]
    pub price_attribute: String,
    pub description: String,
    pub images: String,
    #[serde(rename = "image-attribute")]
    pub image_attribute: String,
    #[serde(rename = "variant-urls")]
    pub variant_urls: String,
    #[serde(rename = "variant-url-attribute")]
    pub variant_url_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            base: ".ecom-sections".to_string(),
            title: ".ecom-product__heading".to_string(),
            price: "[data-price]".to_string(),
            price_attribute: "data-price".to_string(),
            description: ".ecom-html-des".to_string(),
            images: ".ecom-product-thumbnail img, .ecom-splide-slide img".to_string(),
            image_attribute: "src".to_string(),
            variant_urls: "[swatch-url]".to_string(),
            variant_url_attribute: "swatch-url".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the JSON document is written into
    pub directory: String,

    /// File name prefix; a timestamp and `.json` are appended
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: "zline_range_series".to_string(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_wait_for() -> Option<String> {
    Some("css:.ecom-sections".to_string())
}

// Hovering each swatch makes the storefront populate its swatch-url attributes
fn default_js_code() -> Option<String> {
    Some(
        r#"
await new Promise(resolve => setTimeout(resolve, 2000));
document.querySelectorAll('[swatch-url]').forEach(el => {
    el.dispatchEvent(new Event('mouseenter'));
});
await new Promise(resolve => setTimeout(resolve, 1000));
"#
        .to_string(),
    )
}

fn default_delay_ms() -> u64 {
    2000
}
