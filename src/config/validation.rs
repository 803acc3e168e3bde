use crate::config::types::{Config, CrawlerConfig, FetchConfig, FetchMode, OutputConfig, SelectorConfig};
use crate::url::{page_path, parse_origin};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let origin = parse_origin(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin: {}", e)))?;

    if config.max_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max_urls must be >= 1, got {}",
            config.max_urls
        )));
    }

    page_path(&origin, &config.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start_url '{}': {}", config.start_url, e))
    })?;

    Ok(())
}

/// Validates fetch adapter configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.mode == FetchMode::Render {
        let endpoint = config.render_endpoint.as_deref().ok_or_else(|| {
            ConfigError::Validation("render_endpoint is required in render mode".to_string())
        })?;

        let url = Url::parse(endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid render_endpoint '{}': {}", endpoint, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "render_endpoint '{}' must use HTTP or HTTPS",
                endpoint
            )));
        }
    }

    Ok(())
}

/// Validates that every selector parses and every attribute name is set
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("base", &config.base),
        ("title", &config.title),
        ("price", &config.price),
        ("description", &config.description),
        ("images", &config.images),
        ("variant_urls", &config.variant_urls),
    ];

    for (field, selector) in selectors {
        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            field: field.to_string(),
            message: e.to_string(),
        })?;
    }

    let attributes = [
        ("price_attribute", &config.price_attribute),
        ("image_attribute", &config.image_attribute),
        ("variant_url_attribute", &config.variant_url_attribute),
    ];

    for (field, attribute) in attributes {
        if attribute.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "directory cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "file_prefix cannot be empty".to_string(),
        ));
    }

    if !config
        .file_prefix
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "file_prefix must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.file_prefix
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                origin: "https://shop.example.com".to_string(),
                start_url: "/products/range".to_string(),
                max_urls: 10,
            },
            fetch: FetchConfig::default(),
            selectors: SelectorConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_max_urls() {
        let mut config = valid_config();
        config.crawler.max_urls = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_origin() {
        let mut config = valid_config();
        config.crawler.origin = "shop.example.com".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_start_url_on_other_origin() {
        let mut config = valid_config();
        config.crawler.start_url = "https://other.example.com/products/range".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_start_url() {
        let mut config = valid_config();
        config.crawler.start_url = " ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_render_mode_requires_endpoint() {
        let mut config = valid_config();
        config.fetch.mode = FetchMode::Render;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.fetch.render_endpoint = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.fetch.render_endpoint = Some("http://localhost:11235/crawl".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = valid_config();
        config.fetch.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_selector() {
        let mut config = valid_config();
        config.selectors.title = "[[".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector { field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_empty_attribute() {
        let mut config = valid_config();
        config.selectors.variant_url_attribute = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_file_prefix_characters() {
        let mut config = valid_config();
        config.output.file_prefix = "../escape".to_string();
        assert!(validate(&config).is_err());

        config.output.file_prefix = "range-series_v2".to_string();
        assert!(validate(&config).is_ok());
    }
}
