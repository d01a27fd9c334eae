//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout and redirect limits
//! - HTML text and link extraction
//! - The breadth-first frontier
//! - Overall crawl coordination and event reporting

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::{normalize_lines, parse_page, ExtractedPage};

use crate::config::Config;
use crate::events::{CrawlEvent, EventSink};

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate `config` and build the HTTP client from `config.http`
/// 2. Traverse the seed's domain breadth-first
/// 3. Report one progress event per page
/// 4. Finish with exactly one `Complete` or `Error` event
///
/// # Arguments
///
/// * `seed` - Absolute seed URL
/// * `config` - The crawler configuration
/// * `sink` - Where events are reported
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::Config;
/// use site_scribe::crawler::crawl;
/// use site_scribe::CrawlEvent;
///
/// # async fn example() {
/// let mut events: Vec<CrawlEvent> = Vec::new();
/// crawl("https://example.com/", &Config::default(), &mut events).await;
/// assert!(events.last().map_or(false, |e| e.is_terminal()));
/// # }
/// ```
pub async fn crawl<S: EventSink>(seed: &str, config: &Config, sink: &mut S) {
    match Crawler::from_config(config) {
        Ok(crawler) => crawler.crawl(seed, sink).await,
        Err(e) => {
            tracing::error!("Failed to set up crawler: {}", e);
            let _ = sink.report(CrawlEvent::Error {
                message: e.to_string(),
            });
        }
    }
}
