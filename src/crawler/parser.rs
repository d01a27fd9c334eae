//! HTML extraction for scraped pages
//!
//! This module turns fetched markup into:
//! - The page title
//! - The visible body text, normalized line by line
//! - Raw `href` values of every anchor, in document order

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as page content
const EXCLUDED_ELEMENTS: &[&str] = &["script", "style", "noscript", "iframe"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Trimmed `<title>` text, `None` when missing or blank
    pub title: Option<String>,

    /// Visible body text: trimmed, non-empty lines joined with `\n`
    pub content: String,

    /// Raw `href` attributes of `<a>` elements, unresolved
    pub links: Vec<String>,
}

/// Parses HTML content and extracts title, text and link candidates
///
/// # Extraction Rules
///
/// - Text inside `script`, `style`, `noscript` and `iframe` is skipped
/// - Body text is split on line breaks; each line is trimmed and empty
///   lines are dropped
/// - Every `<a href>` is reported, including off-site and non-HTTP links;
///   filtering happens when links are offered to the frontier
///
/// # Example
///
/// ```
/// use site_scribe::crawler::parse_page;
///
/// let html = r#"<html><head><title> Test </title></head>
/// <body><script>var x;</script><p>Hello</p>
/// <a href="/page">Link</a></body></html>"#;
/// let page = parse_page(html);
/// assert_eq!(page.title, Some("Test".to_string()));
/// assert_eq!(page.content, "Hello\nLink");
/// assert_eq!(page.links, vec!["/page".to_string()]);
/// ```
pub fn parse_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        links: extract_links(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts and normalizes the visible body text
fn extract_content(document: &Html) -> String {
    let mut raw = String::new();

    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            collect_text(body, &mut raw);
        }
    }

    normalize_lines(&raw)
}

/// Appends the text of `element`'s subtree, skipping excluded elements
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if EXCLUDED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Trims every line, drops empty ones and joins the rest with `\n`
pub fn normalize_lines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects `href` values from every anchor in document order
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
