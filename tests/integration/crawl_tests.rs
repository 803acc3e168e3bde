//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and rendering
//! services, and test the full traversal end-to-end.

use serde_json::{json, Value};
use swatch_ripple::config::{
    Config, CrawlerConfig, FetchConfig, FetchMode, OutputConfig, SelectorConfig,
};
use swatch_ripple::crawler::{crawl, Coordinator};
use swatch_ripple::output::write_document;
use swatch_ripple::state::{PageState, TraversalState};
use swatch_ripple::Series;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given origin and fetch settings
fn create_test_config(origin: &str, start_url: &str, max_urls: u32, fetch: FetchConfig) -> Config {
    Config {
        crawler: CrawlerConfig {
            origin: origin.to_string(),
            start_url: start_url.to_string(),
            max_urls,
        },
        fetch,
        selectors: SelectorConfig::default(),
        output: OutputConfig::default(),
    }
}

/// Renders a product page using the default selectors
fn product_page(title: &str, price: &str, swatches: &[&str]) -> String {
    let swatch_html: String = swatches
        .iter()
        .map(|s| format!(r#"<div class="swatch" swatch-url="{}"></div>"#, s))
        .collect();

    format!(
        r#"<html><head><title>Shop</title></head><body>
        <div class="ecom-sections">
            <h1 class="ecom-product__heading">{}</h1>
            <div class="ecom-product__price" data-price="{}"></div>
            <div class="ecom-html-des">Professional range</div>
            <div class="ecom-product-thumbnail"><img src="/img/{}.jpg"></div>
            {}
        </div>
        </body></html>"#,
        title, price, price, swatch_html
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_crawl_follows_swatches() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/products/p36",
        product_page(
            "Paramount 36 in. Dual Fuel Range in Stainless Steel (SDR-36)",
            "649500",
            &["/products/p30", "/products/c30", "/products/missing"],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/products/p30",
        product_page(
            "Paramount 30 in. Gas Range in Stainless Steel (SGR-30)",
            "429500",
            &["/products/p36"],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/products/c30",
        product_page("Classic 30 in. Gas Range (CGR-30)", "229900", &[]),
    )
    .await;
    // /products/missing is unmatched and answers 404

    let config = create_test_config(
        &mock_server.uri(),
        "/products/p36",
        10,
        FetchConfig::default(),
    );

    let mut coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let document = coordinator.run().await;

    assert_eq!(coordinator.state(), TraversalState::Done);
    assert_eq!(document.scrape_metadata.total_variants, 3);
    assert_eq!(document.scrape_metadata.total_series, 2);

    let paramount = document.range_series.get(Series::Paramount).unwrap();
    let skus: Vec<&str> = paramount.variants.iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(skus, vec!["SGR-30", "SDR-36"]);
    assert_eq!(paramount.variants[0].price, 429500);
    assert_eq!(
        paramount.variants[0].url,
        format!("{}/products/p30", mock_server.uri())
    );
    assert_eq!(paramount.variants[0].images, vec!["/img/429500.jpg"]);

    let classic = document.range_series.get(Series::Classic).unwrap();
    assert_eq!(classic.total_variants, 1);

    let stats = coordinator.stats();
    assert_eq!(stats.pages_fetched, 4);
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(
        coordinator.page_state("/products/missing"),
        Some(PageState::Failed)
    );
}

#[tokio::test]
async fn test_http_crawl_respects_cap() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/a",
        product_page("Select Range A (S-A)", "100", &["/b", "/c"]),
    )
    .await;
    mount_page(&mock_server, "/b", product_page("Select Range B (S-B)", "100", &[])).await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "/a", 2, FetchConfig::default());

    let mut coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let document = coordinator.run().await;

    assert_eq!(document.scrape_metadata.total_variants, 2);
    assert_eq!(coordinator.stats().urls_remaining, 1);
    assert_eq!(coordinator.page_state("/c"), Some(PageState::Queued));
}

#[tokio::test]
async fn test_page_without_product_section_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/landing",
        "<html><body><p>Nothing to see</p></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), "/landing", 5, FetchConfig::default());

    let mut coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let document = coordinator.run().await;

    assert_eq!(coordinator.state(), TraversalState::Done);
    assert!(document.range_series.is_empty());
    assert_eq!(coordinator.page_state("/landing"), Some(PageState::Failed));
}

fn render_config(service: &MockServer, max_urls: u32) -> Config {
    let fetch = FetchConfig {
        mode: FetchMode::Render,
        render_endpoint: Some(format!("{}/crawl", service.uri())),
        ..FetchConfig::default()
    };
    create_test_config("https://shop.example.com", "/products/a", max_urls, fetch)
}

fn render_reply(pages: Value) -> Value {
    json!({
        "success": true,
        "extracted_content": pages.to_string(),
    })
}

#[tokio::test]
async fn test_render_mode_crawl() {
    let service = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({
            "url": "https://shop.example.com/products/a",
            "wait_for": "css:.ecom-sections",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(render_reply(json!([{
            "title": "Paramount 48 in. Gas Range with Brass Burners (SGR-48-BR)",
            "price": "899500",
            "description": "Flagship range",
            "images": [{"url": "https://cdn.example.com/48.jpg"}],
            "variant_urls": [{"url": "/products/b"}, {"url": "/products/a"}],
        }]))))
        .expect(1)
        .mount(&service)
        .await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({ "url": "https://shop.example.com/products/b" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error_message": "navigation timeout",
        })))
        .expect(1)
        .mount(&service)
        .await;

    let config = render_config(&service, 10);

    let mut coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let document = coordinator.run().await;

    assert_eq!(document.scrape_metadata.total_variants, 1);
    let variant = document.variants().next().unwrap();
    assert_eq!(variant.sku, "SGR-48-BR");
    assert_eq!(variant.price, 899500);
    assert_eq!(variant.url, "https://shop.example.com/products/a");
    assert_eq!(variant.details.size, "48 Inch");
    assert_eq!(variant.details.burner_type.as_deref(), Some("Brass Burners"));

    assert_eq!(coordinator.page_state("/products/b"), Some(PageState::Failed));
}

#[tokio::test]
async fn test_render_malformed_reply_is_not_retried() {
    let service = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .expect(1)
        .mount(&service)
        .await;

    let config = render_config(&service, 10);

    let mut coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let document = coordinator.run().await;

    assert_eq!(coordinator.state(), TraversalState::Done);
    assert_eq!(document.scrape_metadata.total_variants, 0);
    assert_eq!(
        coordinator.page_state("/products/a"),
        Some(PageState::Failed)
    );
}

#[tokio::test]
async fn test_crawl_writes_grouped_document() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/c",
        product_page("Classic 30 in. Gas Range (C-30)", "100", &["/p"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/p",
        product_page("Paramount 30 in. Gas Range (P-30)", "200", &["/c"]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), "/c", 10, FetchConfig::default());
    let document = crawl(&config).await.expect("Crawl failed");

    let dir = TempDir::new().unwrap();
    let written = write_document(&document, dir.path(), "catalog", chrono::Local::now())
        .expect("Failed to write document");

    let content = std::fs::read_to_string(&written).unwrap();
    let paramount = content.find("\"paramount\"").unwrap();
    let classic = content.find("\"classic\"").unwrap();
    assert!(paramount < classic);

    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["scrape_metadata"]["total_variants"], 2);
    assert_eq!(value["range_series"]["classic"]["series_name"], "Classic");
}
