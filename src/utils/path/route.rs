//! URL processing utilities for `src` attribute values.
//!
//! - Leading slash handling for site-root references
//! - Query/fragment stripping
//! - External link detection (schemes, protocol-relative URLs)

/// Strip leading slashes from a site-root path.
///
/// # Examples
/// ```ignore
/// assert_eq!(strip_leading_slash("/assets/img/a.png"), "assets/img/a.png");
/// assert_eq!(strip_leading_slash("/"), "");
/// ```
#[inline]
pub fn strip_leading_slash(url: &str) -> &str {
    url.trim_start_matches('/')
}

/// Check if a link is external (has a URL scheme like `http:`, `data:`, etc.)
///
/// A valid scheme must:
/// - Have at least 2 characters before the colon, so a Windows drive
///   such as `C:` is not a scheme
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// Protocol-relative URLs (`//cdn.example.com/x.png`) are external too.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 1
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Drop any `?query` and `#fragment` suffix.
///
/// # Examples
/// ```ignore
/// assert_eq!(strip_query_fragment("a.png?v=2#top"), "a.png");
/// assert_eq!(strip_query_fragment("a.png#top?x"), "a.png");
/// ```
#[inline]
pub fn strip_query_fragment(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
