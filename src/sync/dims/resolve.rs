//! Image source -> file path resolution.
//!
//! Resolves the way a browser would against the document's own location:
//! `/x.png` from the site root, `x.png` and `../x.png` from the document's
//! directory. Query strings and fragments never reach the file system.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::core::LinkKind;
use crate::utils::path::normalize_lexical;
use crate::utils::path::route::{strip_leading_slash, strip_query_fragment};

/// Why an image source does not map to a local file.
///
/// None of these are errors: the tag is simply left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolvable {
    /// Nothing left after stripping query/fragment.
    Empty,
    /// Hosted elsewhere (`https://`, `//cdn...`).
    External,
    /// Inline `data:` payload.
    Inline,
    /// No regular file at the resolved path.
    Missing(PathBuf),
}

impl std::fmt::Display for Unresolvable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty source"),
            Self::External => write!(f, "externally hosted"),
            Self::Inline => write!(f, "inline data"),
            Self::Missing(path) => write!(f, "not found at {}", path.display()),
        }
    }
}

/// Resolves `src` values against a site root.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    root: &'a Path,
}

impl<'a> PathResolver<'a> {
    pub const fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Map `src` as written in `document` to an existing image file.
    pub fn resolve(&self, src: &str, document: &Path) -> Result<PathBuf, Unresolvable> {
        let src = src.trim();
        let kind = LinkKind::parse(src);
        let raw = match kind {
            LinkKind::Inline => return Err(Unresolvable::Inline),
            LinkKind::External => return Err(Unresolvable::External),
            LinkKind::SiteRoot(link) | LinkKind::FileRelative(link) => strip_query_fragment(link),
        };
        if raw.is_empty() {
            return Err(Unresolvable::Empty);
        }

        // `my%20photo.png` names `my photo.png`; a literal `%` in a file
        // name is still found through the raw spelling.
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        let mut candidates = vec![decoded.as_ref()];
        if decoded != raw {
            candidates.push(raw);
        }

        let mut first_miss = None;
        for candidate in candidates {
            let path = normalize_lexical(&self.join(kind, candidate, document));
            if path.is_file() {
                return Ok(path);
            }
            first_miss.get_or_insert(path);
        }

        Err(Unresolvable::Missing(first_miss.unwrap_or_default()))
    }

    fn join(&self, kind: LinkKind<'_>, path: &str, document: &Path) -> PathBuf {
        match kind {
            LinkKind::SiteRoot(_) => self.root.join(strip_leading_slash(path)),
            _ => document.parent().unwrap_or(self.root).join(path),
        }
    }
}
