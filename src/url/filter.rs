use crate::url::domain::extract_domain;
use crate::url::normalize::strip_fragment;
use url::Url;

/// Path extensions of non-document resources that are never enqueued
const EXCLUDED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "pdf", "zip", "css", "js", "svg", "ico", "woff", "woff2", "ttf",
    "eot",
];

/// Resolves a raw `href` and applies the scope and type filters
///
/// # Filter Rules (in order)
///
/// 1. Resolve `href` against `base_url`; reject if resolution fails
/// 2. Reject non-HTTP(S) results (`mailto:`, `javascript:`, ...)
/// 3. Reject if the host differs from `domain`
/// 4. Reject if the path ends in an excluded extension
/// 5. Strip the fragment
///
/// Deduplication against the visited set and the queue is the frontier's
/// job and is not done here.
///
/// # Arguments
///
/// * `base_url` - URL of the page the link was found on
/// * `href` - Raw `href` attribute value
/// * `domain` - Host of the crawl seed
///
/// # Returns
///
/// * `Some(Url)` - Link to offer to the frontier
/// * `None` - Link rejected
///
/// # Examples
///
/// ```
/// use site_scribe::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let link = resolve_link(&base, "intro#setup", "example.com").unwrap();
/// assert_eq!(link.as_str(), "https://example.com/docs/intro");
///
/// assert!(resolve_link(&base, "https://other.com/", "example.com").is_none());
/// assert!(resolve_link(&base, "/logo.png", "example.com").is_none());
/// ```
pub fn resolve_link(base_url: &Url, href: &str, domain: &str) -> Option<Url> {
    let absolute = match base_url.join(href.trim()) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Dropping malformed link {:?}: {}", href, e);
            return None;
        }
    };

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    if extract_domain(&absolute).as_deref() != Some(domain) {
        tracing::trace!("Dropping out-of-domain link {}", absolute);
        return None;
    }

    if has_excluded_extension(&absolute) {
        tracing::trace!("Dropping non-document link {}", absolute);
        return None;
    }

    Some(strip_fragment(absolute))
}

/// Returns true if the URL path ends in a non-document extension
///
/// The comparison is case-insensitive and looks only at the path, so query
/// strings and fragments do not affect the result.
pub fn has_excluded_extension(url: &Url) -> bool {
    let path = url.path();
    let last_segment = path.rsplit('/').next().unwrap_or(path);

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => EXCLUDED_EXTENSIONS
            .iter()
            .any(|excluded| ext.eq_ignore_ascii_case(excluded)),
        None => false,
    }
}
