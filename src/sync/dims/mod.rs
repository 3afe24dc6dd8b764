//! Dimension Sync Pass.
//!
//! For every `<img>` start tag in a document:
//!
//! ```text
//! src ──► PathResolver ──► ImageProbe ──► patch(width, height)
//!  │           │                │
//!  └ no src    └ external,      └ unreadable
//!              │ inline,          image
//!              └ missing
//!                 └──────────────┴──► tag left byte-identical
//! ```
//!
//! Tags are rewritten in place through [`splice`]; text between tags is
//! never touched. A document that is not valid UTF-8 is scanned but never
//! written back.

mod patch;
mod report;
mod resolve;

use patch::patch;
pub use report::DimsReport;
pub use resolve::{PathResolver, Unresolvable};

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::splice;
use crate::debug;
use crate::document::{Document, DocumentError};
use crate::image::{Dimensions, ImageProbe, Unavailable};
use crate::utils::html::find_attribute;

/// `<img` followed by whitespace, up to the first `>`.
static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\s[^>]*>").unwrap());

/// One `<img ...>` start tag found in a document.
#[derive(Debug, Clone)]
pub struct ImageTag<'t> {
    /// Byte range in the document text.
    pub range: Range<usize>,
    pub text: &'t str,
}

impl<'t> ImageTag<'t> {
    fn new(text: &'t str, range: Range<usize>) -> Self {
        Self { range, text }
    }

    /// Raw `src` value, if the tag has one.
    pub fn src(&self) -> Option<&'t str> {
        find_attribute(self.text, "src").map(|attr| attr.value_str(self.text))
    }
}

/// An image tag whose source mapped to a readable local image.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub src: String,
    pub path: PathBuf,
    pub size: Dimensions,
}

/// Why a tag was left unchanged.
#[derive(Debug, Clone)]
pub enum SkipReason {
    NoSource,
    Unresolvable(Unresolvable),
    Unavailable { path: PathBuf, error: Unavailable },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSource => write!(f, "no src attribute"),
            Self::Unresolvable(reason) => reason.fmt(f),
            Self::Unavailable { path, error } => {
                write!(f, "unreadable image {}: {}", path.display(), error)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedTag {
    /// 1-based line of the tag in the document.
    pub line: usize,
    /// Raw `src` value (empty when missing).
    pub src: String,
    pub reason: SkipReason,
}

/// Per-document tally of the dimension pass.
#[derive(Debug, Clone, Default)]
pub struct DimsOutcome {
    /// `<img>` tags found in the original text.
    pub tags_found: usize,
    /// Tags whose text changed.
    pub tags_changed: usize,
    /// Tags left alone, with the reason.
    pub skipped: Vec<SkippedTag>,
}

/// Result of running the pass over one file.
#[derive(Debug)]
pub struct DimsDocument {
    pub path: PathBuf,
    pub outcome: DimsOutcome,
    /// The file was rewritten.
    pub written: bool,
    /// The file was not valid UTF-8; it was left unwritten.
    pub lossy: bool,
}

/// The Dimension Sync Pass, bound to a site root and a probe.
pub struct DimensionSync<'a, P: ImageProbe> {
    resolver: PathResolver<'a>,
    probe: &'a P,
}

impl<'a, P: ImageProbe> DimensionSync<'a, P> {
    pub const fn new(root: &'a Path, probe: &'a P) -> Self {
        Self {
            resolver: PathResolver::new(root),
            probe,
        }
    }

    /// Rewrite every resolvable `<img>` tag in `text`.
    ///
    /// `document` is the path the text was read from; document-relative
    /// sources resolve against its directory. Returns the text borrowed
    /// when no tag changed.
    pub fn sync_text<'t>(&self, text: &'t str, document: &Path) -> (Cow<'t, str>, DimsOutcome) {
        let mut skipped = Vec::new();

        let spliced = splice(text, &IMG_TAG, |caps| {
            let whole = caps.get(0)?;
            let tag = ImageTag::new(whole.as_str(), whole.range());
            match self.resolve_tag(&tag, document) {
                Ok(image) => {
                    debug!("dims"; "`{}` -> {} ({}x{})", image.src, image.path.display(), image.size.width, image.size.height);
                    Some(patch(tag.text, image.size))
                }
                Err(mut skip) => {
                    skip.line = line_of(text, tag.range.start);
                    skipped.push(skip);
                    None
                }
            }
        });

        let outcome = DimsOutcome {
            tags_found: spliced.matched,
            tags_changed: spliced.replaced,
            skipped,
        };
        (spliced.text, outcome)
    }

    /// Resolve a tag's source and probe the image it names.
    pub fn resolve_tag(&self, tag: &ImageTag<'_>, document: &Path) -> Result<ResolvedImage, SkippedTag> {
        let Some(src) = tag.src() else {
            return Err(SkippedTag {
                line: 0,
                src: String::new(),
                reason: SkipReason::NoSource,
            });
        };

        let skip = |reason| SkippedTag {
            line: 0,
            src: src.to_string(),
            reason,
        };

        let path = self
            .resolver
            .resolve(src, document)
            .map_err(|e| skip(SkipReason::Unresolvable(e)))?;

        let size = self.probe.dimensions(&path).map_err(|error| {
            skip(SkipReason::Unavailable {
                path: path.clone(),
                error,
            })
        })?;

        Ok(ResolvedImage {
            src: src.to_string(),
            path,
            size,
        })
    }

    /// Run the pass over one file and write it back if anything changed.
    ///
    /// A lossy decode is never written: its tags all count as unchanged.
    pub fn sync_document(&self, path: &Path) -> Result<DimsDocument, DocumentError> {
        let document = Document::read(path)?;
        let (text, mut outcome) = self.sync_text(document.text(), document.path());
        let written = document.commit(&text)?;
        if document.is_lossy() {
            outcome.tags_changed = 0;
        }

        for skip in &outcome.skipped {
            debug!("dims"; "{}:{}: skipped `{}` ({})", path.display(), skip.line, skip.src, skip.reason);
        }

        Ok(DimsDocument {
            path: path.to_path_buf(),
            outcome,
            written,
            lossy: document.is_lossy(),
        })
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}
