//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent, timeout and
//!   redirect limit
//! - GET requests to fetch page markup
//! - Error classification (timeout, redirect exhaustion, bad status)

use crate::config::HttpConfig;
use crate::ScribeError;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use url::Url;

/// Source of page markup for the crawler
///
/// The HTTP implementation is [`HttpFetcher`]; tests plug in in-memory
/// site graphs.
pub trait PageFetcher {
    /// Fetches `url` and returns the response body
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, ScribeError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::HttpConfig;
/// use site_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, ScribeError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ScribeError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and returns its body
///
/// # Outcome Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | Final status 2xx or 3xx | `Ok(body)` |
/// | Any other status | `ScribeError::Status` |
/// | Timeout | `ScribeError::Timeout` |
/// | Redirect chain over the limit | `ScribeError::RedirectLimit` |
/// | Connection or protocol error | `ScribeError::Http` |
/// | Body cannot be decoded | `ScribeError::Body` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &Url) -> Result<String, ScribeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !(status.is_success() || status.is_redirection()) {
        return Err(ScribeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            ScribeError::Timeout {
                url: url.to_string(),
            }
        } else {
            ScribeError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })
}

/// Maps a transport error onto the crate's error variants
fn classify_error(url: &Url, error: reqwest::Error) -> ScribeError {
    if error.is_timeout() {
        ScribeError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_redirect() {
        ScribeError::RedirectLimit {
            url: url.to_string(),
        }
    } else {
        ScribeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
