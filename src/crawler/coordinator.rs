//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Dequeuing URLs from the frontier
//! - Fetching and extracting each page
//! - Feeding in-scope links back into the frontier
//! - Reporting progress and the terminal event

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::events::{CrawlEvent, EventSink};
use crate::output::CrawlOutcome;
use crate::state::PageResult;
use crate::url::resolve_link;
use crate::ScribeError;
use std::time::Instant;
use url::Url;

/// What a finished traversal produced
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Scraped pages in visit order
    pub results: Vec<PageResult>,

    /// Dequeue attempts, including failed fetches
    pub pages_scraped: u32,

    /// Pages whose fetch failed
    pub pages_failed: u32,

    /// Size of the visited set at the end
    pub visited: usize,

    /// The loop stopped at the page cap
    pub cap_reached: bool,

    /// The event consumer disconnected before the crawl finished
    pub cancelled: bool,
}

/// Main crawler structure
///
/// Holds settings and a page fetcher; every call to [`Crawler::run`] or
/// [`Crawler::crawl`] gets its own frontier, so one `Crawler` can serve
/// several crawls.
pub struct Crawler<F> {
    config: CrawlerConfig,
    fetcher: F,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// The configuration is validated first, since it may have been built in
    /// code or patched after loading.
    pub fn from_config(config: &Config) -> Result<Self, ScribeError> {
        validate(config)?;
        Ok(Self::new(
            config.crawler.clone(),
            HttpFetcher::new(&config.http)?,
        ))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a new crawler with the given fetcher
    pub fn new(config: CrawlerConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Runs the traversal and returns what it produced
    ///
    /// Reports one progress event per dequeued page and the cap warning when
    /// the page limit stops the crawl. Does not report a terminal event.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Traversal ended (queue empty, cap hit, or consumer gone)
    /// * `Err(ScribeError)` - The seed has no host
    pub async fn run<S: EventSink>(
        &self,
        seed: Url,
        sink: &mut S,
    ) -> Result<CrawlReport, ScribeError> {
        let mut frontier = Frontier::new(seed, self.config.max_pages)?;
        let domain = frontier.domain().to_string();
        let max_pages = frontier.max_pages();
        let delay = self.config.delay();
        let start_time = Instant::now();

        tracing::info!("Starting crawl of {} (max {} pages)", domain, max_pages);

        let mut report = CrawlReport::default();

        while let Some((url, index)) = frontier.next_url() {
            tracing::debug!("Processing URL: {}", url);

            let event = match self.fetcher.fetch(&url).await {
                Ok(body) => {
                    let page = parse_page(&body);

                    let mut enqueued = 0;
                    for href in &page.links {
                        if let Some(link) = resolve_link(&url, href, &domain) {
                            if frontier.offer(link) {
                                enqueued += 1;
                            }
                        }
                    }
                    tracing::debug!(
                        "{}: {} links, {} enqueued, {} in frontier",
                        url,
                        page.links.len(),
                        enqueued,
                        frontier.queue_len()
                    );

                    let event = CrawlEvent::scraped(url.as_str(), index, max_pages);
                    report
                        .results
                        .push(PageResult::new(url, page.title, page.content));
                    event
                }
                Err(e) => {
                    tracing::warn!("Failed to scrape {}: {}", url, e);
                    report.pages_failed += 1;
                    CrawlEvent::failed(url.as_str(), index, max_pages, &e.to_string())
                }
            };

            if sink.report(event).is_err() {
                tracing::info!("Event consumer disconnected, stopping crawl");
                report.cancelled = true;
                break;
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        report.pages_scraped = frontier.pages_scraped();
        report.visited = frontier.visited_count();

        if !report.cancelled && frontier.cap_reached() {
            report.cap_reached = true;
            tracing::warn!("Reached maximum page limit ({}). Stopping.", max_pages);
            if sink.report(CrawlEvent::cap_reached(max_pages)).is_err() {
                report.cancelled = true;
            }
        }

        tracing::info!(
            "Crawl finished: {} pages attempted, {} scraped, {} failed in {:?}",
            report.pages_scraped,
            report.results.len(),
            report.pages_failed,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Crawls from `seed` and finishes with exactly one terminal event
    ///
    /// Never fails past this boundary: an unusable seed is reported as an
    /// `Error` event, a finished traversal as `Complete` carrying both
    /// artifacts. If the consumer disconnects, no terminal event is sent.
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute seed URL (see [`crate::url::normalize_seed`])
    /// * `sink` - Where events are reported
    pub async fn crawl<S: EventSink>(&self, seed: &str, sink: &mut S) {
        let seed_url = match Url::parse(seed) {
            Ok(url) => url,
            Err(e) => {
                let error = ScribeError::InvalidSeed {
                    url: seed.to_string(),
                    reason: e.to_string(),
                };
                report_error(sink, &error);
                return;
            }
        };

        if !matches!(seed_url.scheme(), "http" | "https") {
            let error = ScribeError::InvalidSeed {
                url: seed.to_string(),
                reason: format!("unsupported scheme '{}'", seed_url.scheme()),
            };
            report_error(sink, &error);
            return;
        }

        match self.run(seed_url, sink).await {
            Ok(report) if report.cancelled => {}
            Ok(report) => {
                let outcome = CrawlOutcome::from_results(&report.results);
                if sink.report(CrawlEvent::Complete { data: outcome }).is_err() {
                    tracing::info!("Event consumer disconnected before completion");
                }
            }
            Err(e) => report_error(sink, &e),
        }
    }
}

/// Reports a crawl-level failure as the terminal event
fn report_error<S: EventSink>(sink: &mut S, error: &ScribeError) {
    tracing::error!("Crawl failed: {}", error);
    let _ = sink.report(CrawlEvent::Error {
        message: error.to_string(),
    });
}
