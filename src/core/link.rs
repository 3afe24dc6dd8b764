//! Image source classification.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of an `<img src>` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Inline payload (`data:image/png;base64,...`).
    Inline,
    /// Hosted elsewhere: any URL scheme or a protocol-relative `//host/...`.
    External,
    /// Site-root-relative path (`/assets/img/a.png`).
    SiteRoot(&'a str),
    /// Document-relative path (`img/a.png`, `../assets/a.png`).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a src value into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if link
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
        {
            Self::Inline
        } else if is_external_link(link) {
            Self::External
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

}
