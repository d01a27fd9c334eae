//! Full-text document generation
//!
//! Concatenates every scraped page into one plain-text document, in visit
//! order, with a header block per page.

use crate::state::PageResult;

/// Width of the separator lines around each page header
const SEPARATOR_WIDTH: usize = 80;

/// Formats the scraped pages as one plain-text document
///
/// Each page produces:
///
/// ```text
/// ================================================================================
/// URL: <url>
/// TITLE: <title>            (only when the page has a title)
/// --------------------------------------------------------------------------------
/// <content>
///
///
/// ```
///
/// # Arguments
///
/// * `results` - Scraped pages in visit order
///
/// # Returns
///
/// The document text (empty when there are no results)
pub fn build_full_text(results: &[PageResult]) -> String {
    let major = "=".repeat(SEPARATOR_WIDTH);
    let minor = "-".repeat(SEPARATOR_WIDTH);
    let mut text = String::new();

    for page in results {
        text.push_str(&major);
        text.push('\n');
        text.push_str(&format!("URL: {}\n", page.url));
        if let Some(title) = &page.title {
            text.push_str(&format!("TITLE: {}\n", title));
        }
        text.push_str(&minor);
        text.push('\n');
        text.push_str(&page.content);
        text.push_str("\n\n\n");
    }

    text
}
