//! Traversal coordinator - main crawl orchestration logic
//!
//! This module contains the sequential crawl loop that ties together:
//! - The frontier (what to visit next, and the visit cap)
//! - The fetch adapter (page rendering and extraction)
//! - The catalog aggregator (classification and grouping)
//!
//! Exactly one fetch is in flight at a time. A failed page is logged and
//! skipped; nothing in the loop aborts the run.

use crate::catalog::{CatalogAggregator, CatalogDocument, RawPageFields};
use crate::config::Config;
use crate::crawler::build_fetcher;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::extract::Series;
use crate::state::{PageState, TraversalState};
use crate::url::{join_origin, page_path, parse_origin};
use crate::SwatchError;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Counters describing a traversal run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Distinct pages handed to the fetch adapter
    pub pages_fetched: usize,

    /// Pages whose variant was ingested
    pub pages_processed: usize,

    /// Pages whose fetch or extraction failed
    pub pages_failed: usize,

    /// Candidate swatch URLs after per-page deduplication
    pub urls_discovered: usize,

    /// Candidates that were new to the frontier
    pub urls_enqueued: usize,

    /// Dequeued paths dropped because they had already been visited
    pub duplicates_dropped: usize,

    /// Paths still queued (non-zero only when the cap ended the run)
    pub urls_remaining: usize,
}

/// Main traversal coordinator structure
pub struct Coordinator {
    origin: String,
    fetcher: Box<dyn PageFetcher>,
    frontier: Frontier,
    aggregator: CatalogAggregator,
    pages: HashMap<String, PageState>,
    state: TraversalState,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a new coordinator with a fresh frontier and aggregator
    ///
    /// # Arguments
    ///
    /// * `origin` - Fixed origin used to resolve page-relative paths
    /// * `start_url` - Page-relative or same-origin absolute start URL
    /// * `max_urls` - Maximum number of distinct pages to fetch
    /// * `fetcher` - The fetch adapter
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, in the `Running` state
    /// * `Err(SwatchError)` - The origin or start URL is invalid
    pub fn new(
        origin: &str,
        start_url: &str,
        max_urls: usize,
        fetcher: Box<dyn PageFetcher>,
    ) -> Result<Self, SwatchError> {
        let origin = parse_origin(origin)?;
        let start = page_path(&origin, start_url)?;

        let mut pages = HashMap::new();
        pages.insert(start.clone(), PageState::Queued);

        Ok(Self {
            frontier: Frontier::new(start, max_urls),
            aggregator: CatalogAggregator::new(origin.clone()),
            origin,
            fetcher,
            pages,
            state: TraversalState::Running,
            stats: CrawlStats::default(),
        })
    }

    /// Creates a coordinator and its fetch adapter from configuration
    pub fn from_config(config: &Config) -> Result<Self, SwatchError> {
        let fetcher = build_fetcher(config)?;
        Self::new(
            &config.crawler.origin,
            &config.crawler.start_url,
            config.crawler.max_urls as usize,
            fetcher,
        )
    }

    /// Runs the traversal to completion and builds the catalog document
    ///
    /// The loop:
    /// 1. Takes the next unvisited path from the frontier
    /// 2. Fetches it through the adapter
    /// 3. Ingests the fields and queues newly discovered swatch URLs
    ///
    /// It ends when the queue is empty or the visit cap is reached, moving
    /// the coordinator to `Done`.
    pub async fn run(&mut self) -> CatalogDocument {
        let max_urls = self.frontier.max_urls();
        let start_time = Instant::now();
        tracing::info!("Starting traversal: will stop after {} URLs", max_urls);

        while let Some(path) = self.frontier.next_url() {
            tracing::info!(
                "[{}/{}] Scraping: {}",
                self.frontier.visited_count(),
                max_urls,
                path
            );
            self.process_url(&path).await;
        }

        self.state = TraversalState::Done;

        let remaining = self.frontier.queued_count();
        if remaining > 0 {
            tracing::info!(
                "Visit cap of {} reached, {} queued URLs left unvisited",
                max_urls,
                remaining
            );
        } else {
            tracing::info!("Frontier is empty, traversal complete");
        }

        tracing::info!(
            "Traversal completed: {} pages fetched ({} failed), {} variants in {:?}",
            self.frontier.visited_count(),
            self.stats.pages_failed,
            self.aggregator.total_variants(),
            start_time.elapsed()
        );

        self.aggregator.build_document()
    }

    /// Fetches a single page and feeds the result to the aggregator and frontier
    async fn process_url(&mut self, path: &str) {
        self.set_page_state(path, PageState::Fetching);
        self.stats.pages_fetched += 1;

        let url = join_origin(&self.origin, path);

        match self.fetcher.fetch(&url).await {
            Ok(fields) => {
                let series = self.aggregator.ingest(path, &fields);
                self.set_page_state(path, PageState::Processed);
                self.stats.pages_processed += 1;
                self.handle_discovered_links(path, series, &fields);
            }
            Err(e) => {
                tracing::warn!("Failed to scrape {}: {}", path, e);
                self.set_page_state(path, PageState::Failed);
                self.stats.pages_failed += 1;
            }
        }
    }

    /// Queues the page's swatch URLs that are neither visited nor queued
    fn handle_discovered_links(&mut self, path: &str, series: Series, fields: &RawPageFields) {
        let mut seen = HashSet::new();
        let candidates: Vec<String> = fields
            .variant_urls
            .iter()
            .filter_map(|link| match page_path(&self.origin, link) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::debug!("Skipping swatch URL {} on {}: {}", link, path, e);
                    None
                }
            })
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();

        tracing::info!(
            "Found {} variant URLs | Series: {}",
            candidates.len(),
            series
        );
        self.stats.urls_discovered += candidates.len();

        let mut added = 0;
        for candidate in candidates {
            if self.frontier.enqueue(candidate.clone()) {
                self.pages.insert(candidate, PageState::Queued);
                added += 1;
            }
        }

        self.stats.urls_enqueued += added;
        tracing::info!("Added {} new URLs to queue", added);
    }

    fn set_page_state(&mut self, path: &str, next: PageState) {
        let current = self.pages.get(path).copied().unwrap_or(PageState::Queued);
        match current.transition(next) {
            Ok(state) => {
                self.pages.insert(path.to_string(), state);
            }
            Err(e) => tracing::error!("{} for {}", e, path),
        }
    }

    /// Returns the traversal lifecycle state
    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// Returns the run counters, including live frontier figures
    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            duplicates_dropped: self.frontier.duplicates_dropped(),
            urls_remaining: self.frontier.queued_count(),
            ..self.stats.clone()
        }
    }

    /// Returns the state of a page the traversal has seen
    pub fn page_state(&self, path: &str) -> Option<PageState> {
        self.pages.get(path).copied()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn aggregator(&self) -> &CatalogAggregator {
        &self.aggregator
    }
}

/// Runs a complete traversal from configuration
///
/// # Example
///
/// ```no_run
/// use swatch_ripple::config::load_config;
/// use swatch_ripple::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let document = run_crawl(&config).await?;
/// println!("{} variants", document.scrape_metadata.total_variants);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CatalogDocument, SwatchError> {
    let mut coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run().await)
}
