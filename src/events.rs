//! Crawl event protocol
//!
//! The crawler reports through an [`EventSink`]: one progress event per
//! dequeued page, an optional page-cap warning, and exactly one terminal
//! event (`Complete` or `Error`). Events are plain data; framing them for a
//! transport is the sink's concern.

use crate::output::CrawlOutcome;
use crate::state::PageState;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Structured status of the page a progress event refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// The dequeued URL
    pub url: String,

    /// 1-based position in the fetch order
    pub index: u32,

    /// Page cap of the crawl
    pub max_pages: u32,

    /// Whether the page made it into the results
    pub state: PageState,
}

/// Event emitted by a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CrawlEvent {
    /// Human-readable progress; `page` is absent for the cap warning
    Progress {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<PageReport>,
    },

    /// Terminal success carrying both artifacts
    Complete { data: CrawlOutcome },

    /// Terminal failure
    Error { message: String },
}

impl CrawlEvent {
    /// Progress event for a page that was scraped
    pub fn scraped(url: &str, index: u32, max_pages: u32) -> Self {
        Self::Progress {
            message: format!("Scraped: {} ({}/{})", url, index, max_pages),
            page: Some(PageReport {
                url: url.to_string(),
                index,
                max_pages,
                state: PageState::Scraped,
            }),
        }
    }

    /// Progress event for a page whose fetch failed
    pub fn failed(url: &str, index: u32, max_pages: u32, error: &str) -> Self {
        Self::Progress {
            message: format!("Failed: {} ({}/{}): {}", url, index, max_pages, error),
            page: Some(PageReport {
                url: url.to_string(),
                index,
                max_pages,
                state: PageState::Failed,
            }),
        }
    }

    /// Warning emitted when the crawl stops at the page cap
    pub fn cap_reached(max_pages: u32) -> Self {
        Self::Progress {
            message: format!("Reached maximum page limit ({}). Stopping.", max_pages),
            page: None,
        }
    }

    /// Returns true for `Complete` and `Error`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}

/// The event consumer went away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event consumer disconnected")]
pub struct SinkClosed;

/// Destination for crawl events
///
/// `report` is called synchronously at every reporting point. Returning
/// `Err(SinkClosed)` tells the crawler to stop issuing new fetches.
pub trait EventSink {
    fn report(&mut self, event: CrawlEvent) -> Result<(), SinkClosed>;
}

impl EventSink for UnboundedSender<CrawlEvent> {
    fn report(&mut self, event: CrawlEvent) -> Result<(), SinkClosed> {
        self.send(event).map_err(|_| SinkClosed)
    }
}

impl EventSink for Vec<CrawlEvent> {
    fn report(&mut self, event: CrawlEvent) -> Result<(), SinkClosed> {
        self.push(event);
        Ok(())
    }
}

/// Writes each event as one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn report(&mut self, event: CrawlEvent) -> Result<(), SinkClosed> {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize event: {}", e);
                return Ok(());
            }
        };

        // A broken pipe means nobody is reading any more
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|_| SinkClosed)
    }
}
