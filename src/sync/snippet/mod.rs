//! Snippet Canonicalizer.
//!
//! Finds every copy of a recurring control (located by its marker `id`)
//! and replaces it with one canonical version, keeping the indentation the
//! copy had at its site.
//!
//! ```text
//! marker present? ── no ──► NoMarker (untouched)
//!       │
//!       ▼
//! move stray `</tag> <!-- comment -->` comments off closing tags
//!       │
//!       ▼
//! block found? ── no ──► Mismatch (untouched)
//!       │
//!       ▼
//! render canonical at the block's indent ──► Canonical | Replaced
//! ```

mod report;
mod template;

pub use report::SnippetReport;
pub use template::CanonicalSnippet;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use thiserror::Error;

use crate::config::SnippetConfig;
use crate::core::splice;
use crate::document::{Document, DocumentError};

/// Canonicalizer construction failures.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("failed to read snippet template `{0}`")]
    Template(PathBuf, #[source] std::io::Error),

    #[error("invalid snippet pattern")]
    Pattern(#[from] regex::Error),

    /// A template the block pattern cannot find again would be inserted
    /// anew on every run.
    #[error("snippet template is not a single `<button id=\"{0}\">` block")]
    TemplateShape(String),
}

/// What the canonicalizer did to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetState {
    /// Marker attribute absent.
    NoMarker,
    /// Marker present but no block in the recognized layout.
    Mismatch,
    /// Every block already matches the canonical markup.
    Canonical,
    /// Blocks rewritten.
    Replaced { blocks: usize },
}

impl SnippetState {
    #[inline]
    pub const fn has_marker(self) -> bool {
        !matches!(self, Self::NoMarker)
    }
}

/// Result of running the canonicalizer over one file.
#[derive(Debug)]
pub struct SnippetDocument {
    pub path: PathBuf,
    pub state: SnippetState,
    pub written: bool,
    /// Not valid UTF-8: checked but never written.
    pub lossy: bool,
}

/// One matched block, as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetBlock<'t> {
    /// Whitespace before the block's first line.
    pub indent: &'t str,
    /// Line ending the block uses.
    pub eol: &'t str,
}

impl<'t> SnippetBlock<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        let whole = caps.get(0)?;
        let indent = caps.name("indent").map_or("", |m| m.as_str());
        let eol = match caps.name("eol") {
            Some(m) => m.as_str(),
            None if whole.as_str().contains("\r\n") => "\r\n",
            None => "\n",
        };
        Some(Self { indent, eol })
    }
}

/// The Snippet Canonicalizer.
#[derive(Debug)]
pub struct SnippetCanonicalizer {
    /// `id="<marker>"`, checked literally before anything else.
    marker_attr: String,
    /// `</tag> <!-- comment -->` at the end of a line.
    stray_comment: Regex,
    /// Optional comment line, then the `<button>` through `</button>`.
    block: Regex,
    snippet: CanonicalSnippet,
}

impl SnippetCanonicalizer {
    /// Build from config, loading the template file if one is configured.
    pub fn new(config: &SnippetConfig) -> Result<Self, SnippetError> {
        let snippet = CanonicalSnippet::load(config).map_err(|e| {
            SnippetError::Template(config.template.clone().unwrap_or_default(), e)
        })?;
        Self::with_snippet(config, snippet)
    }

    pub fn with_snippet(config: &SnippetConfig, snippet: CanonicalSnippet) -> Result<Self, SnippetError> {
        let comment = comment_pattern(&config.comment);
        let marker = regex::escape(&config.marker);

        let stray_comment = Regex::new(&format!(
            r"(?i)(?P<close></[^>]+>)[ \t]*<!--\s*{comment}\s*-->[ \t]*(?P<eol>\r?\n)"
        ))?;
        let block = Regex::new(&format!(
            r#"(?im)^(?P<indent>[ \t]*)(?:<!--\s*{comment}\s*-->[ \t]*\r?\n[ \t]*)?<button\b[^>]*?\sid\s*=\s*"{marker}"[^>]*>[\s\S]*?</button>[ \t]*(?P<eol>\r?\n)?"#
        ))?;

        let canonicalizer = Self {
            marker_attr: config.marker_attr(),
            stray_comment,
            block,
            snippet,
        };
        canonicalizer.check_template(&config.marker)?;
        Ok(canonicalizer)
    }

    /// The rendered template must be exactly one block, or re-runs would
    /// not converge.
    fn check_template(&self, marker: &str) -> Result<(), SnippetError> {
        let rendered = self.snippet.render("", "\n");
        let whole = self
            .block
            .find(&rendered)
            .is_some_and(|m| m.start() == 0 && m.end() == rendered.len());
        if whole && rendered.contains(&self.marker_attr) {
            Ok(())
        } else {
            Err(SnippetError::TemplateShape(marker.to_string()))
        }
    }

    /// Canonicalize every block in `text`.
    ///
    /// Text comes back borrowed unless a block was rewritten. Moving a
    /// stray comment alone never produces a rewrite.
    pub fn canonicalize_text<'t>(&self, text: &'t str) -> (Cow<'t, str>, SnippetState) {
        if !text.contains(&self.marker_attr) {
            return (Cow::Borrowed(text), SnippetState::NoMarker);
        }

        let normalized = self.stray_comment.replace_all(text, "${close}${eol}");
        let spliced = splice(&normalized, &self.block, |caps| {
            SnippetBlock::from_captures(caps).map(|block| self.snippet.render(block.indent, block.eol))
        });

        if spliced.matched == 0 {
            return (Cow::Borrowed(text), SnippetState::Mismatch);
        }
        if !spliced.is_changed() {
            return (Cow::Borrowed(text), SnippetState::Canonical);
        }

        let blocks = spliced.replaced;
        (
            Cow::Owned(spliced.text.into_owned()),
            SnippetState::Replaced { blocks },
        )
    }

    /// Run over one file and write it back if a block was rewritten.
    ///
    /// A lossy decode keeps its state for reporting but is never written.
    pub fn canonicalize_document(&self, path: &Path) -> Result<SnippetDocument, DocumentError> {
        let document = Document::read(path)?;
        let (text, state) = self.canonicalize_text(document.text());
        let written = match state {
            SnippetState::Replaced { .. } => document.commit(&text)?,
            _ => false,
        };

        Ok(SnippetDocument {
            path: path.to_path_buf(),
            state,
            written,
            lossy: document.is_lossy(),
        })
    }
}

/// Comment text as a pattern that tolerates any whitespace between words.
fn comment_pattern(comment: &str) -> String {
    comment
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s*")
}
