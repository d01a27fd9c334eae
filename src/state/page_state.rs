/// Page state definitions for reporting crawl progress
///
/// Every dequeued page ends in exactly one of these states. Only scraped
/// pages reach the artifacts; failed pages are reported and then dropped.
use serde::Serialize;
use std::fmt;

/// Terminal state of a page after the crawler attempted it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    /// Page was fetched and its text extracted
    Scraped,

    /// Fetch failed (network error, timeout, redirect exhaustion, bad status)
    Failed,
}

impl PageState {
    /// Returns true if this represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Scraped)
    }

    /// Returns the wire representation of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scraped => "scraped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
