//! Sitemap XML generation

use crate::state::PageResult;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Builds a sitemap document listing every scraped page
///
/// Entries keep visit order. The document has no trailing newline.
///
/// # Example
///
/// ```
/// use site_scribe::output::build_sitemap;
/// use site_scribe::PageResult;
/// use url::Url;
///
/// let pages = vec![PageResult::new(
///     Url::parse("https://example.test/").unwrap(),
///     None,
///     String::new(),
/// )];
/// let xml = build_sitemap(&pages);
/// assert!(xml.contains("<loc>https://example.test/</loc>"));
/// ```
pub fn build_sitemap(results: &[PageResult]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for page in results {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(page.url_str())));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

/// Escapes the five XML special characters
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
