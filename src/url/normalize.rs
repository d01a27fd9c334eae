use crate::UrlError;
use url::{ParseError, Url};

/// Normalizes a user-supplied seed into an absolute crawl URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the input as typed; when it has no scheme (`example.com/docs`,
///    `localhost:8080`), parse it again with `https://` in front
/// 3. Reject malformed input
/// 4. Reject schemes other than HTTP and HTTPS (`ftp://`, `mailto:`)
/// 5. Reject URLs without a host
///
/// Nothing else is rewritten: case, trailing slashes and query strings are
/// left as the caller typed them.
///
/// # Arguments
///
/// * `input` - The seed as typed by the user (e.g. `example.com/docs`)
///
/// # Returns
///
/// * `Ok(Url)` - Absolute seed URL
/// * `Err(UrlError)` - The input cannot be turned into an HTTP(S) URL
///
/// # Examples
///
/// ```
/// use site_scribe::url::normalize_seed;
///
/// let url = normalize_seed("example.com/docs").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
///
/// let url = normalize_seed("http://example.com").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
/// ```
pub fn normalize_seed(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    let url = match Url::parse(trimmed) {
        Ok(url) if has_explicit_scheme(trimmed) => url,
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", trimmed))
                .map_err(|e| UrlError::Parse(e.to_string()))?
        }
        Err(e) => return Err(UrlError::Parse(e.to_string())),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns false for `host:port` input, which parses as a URL whose
/// scheme is the host name
fn has_explicit_scheme(input: &str) -> bool {
    let Some((_, rest)) = input.split_once(':') else {
        return false;
    };
    let port_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let looks_like_port = port_len > 0
        && matches!(rest.as_bytes().get(port_len), None | Some(b'/' | b'?' | b'#'));
    !looks_like_port
}

/// Removes the fragment identifier from a URL
///
/// URLs that differ only by fragment address the same page.
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
