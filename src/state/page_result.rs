use url::Url;

/// Text extracted from one successfully fetched page
///
/// Results are appended to the crawl's result list in visit order and are
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// The URL as it was dequeued (fragment already stripped)
    pub url: Url,

    /// Trimmed document title, `None` when missing or blank
    pub title: Option<String>,

    /// Visible body text, one non-empty trimmed line per line
    pub content: String,
}

impl PageResult {
    /// Creates a new page result
    pub fn new(url: Url, title: Option<String>, content: String) -> Self {
        Self {
            url,
            title,
            content,
        }
    }

    /// Returns the URL as a string slice
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}
