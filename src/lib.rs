//! Site-Scribe: a single-domain site transcriber
//!
//! This crate crawls one web domain breadth-first from a seed URL, extracts
//! the visible text of every reachable page, and streams progress events to
//! a caller before handing over two artifacts: a concatenated plain-text
//! document and a sitemap of the visited URLs.

pub mod config;
pub mod crawler;
pub mod events;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Too many redirects from {url}")]
    RedirectLimit { url: String },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body for {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

// Re-export commonly used types
pub use crate::config::Config;
pub use crawler::{crawl, Crawler, HttpFetcher, PageFetcher};
pub use events::{CrawlEvent, EventSink, SinkClosed};
pub use output::CrawlOutcome;
pub use state::{PageResult, PageState};
pub use crate::url::{extract_domain, normalize_seed};
