//! `[snippet]` section configuration.
//!
//! Describes the recurring control the Snippet Canonicalizer unifies.
//!
//! # Example
//!
//! ```toml
//! [snippet]
//! marker = "scroll-to-top"            # id of the <button>
//! comment = "Scroll to Top Button"    # marker comment text
//! exclude = ["backup", "dryrun"]      # path substrings skipped by this pass
//! template = "partials/scroll.html"   # optional canonical markup file
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Snippet Canonicalizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// `id` attribute value of the control's `<button>`.
    pub marker: String,

    /// Text of the marker comment placed on the line before the button.
    pub comment: String,

    /// Root-relative path substrings (case-insensitive) skipped by this pass only.
    pub exclude: Vec<String>,

    /// Canonical markup file (relative to the site root). Built-in markup if unset.
    pub template: Option<PathBuf>,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            marker: "scroll-to-top".into(),
            comment: "Scroll to Top Button".into(),
            exclude: vec!["backup".into(), "dryrun".into()],
            template: None,
        }
    }
}

impl SnippetConfig {
    /// The literal attribute text whose presence selects a document.
    pub fn marker_attr(&self) -> String {
        format!("id=\"{}\"", self.marker)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.marker.trim().is_empty() {
            diag.error("snippet.marker", "marker id must not be empty");
        }
        if self.marker.contains('"') {
            diag.error("snippet.marker", "marker id must not contain quotes");
        }
        if self.comment.contains("--") {
            diag.error("snippet.comment", "comment text must not contain `--`");
        }
        if let Some(template) = &self.template
            && !template.is_file()
        {
            diag.error_with_hint(
                "snippet.template",
                format!("template `{}` not found", template.display()),
                "paths are relative to the site root",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_snippet_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.snippet.marker, "scroll-to-top");
        assert_eq!(config.snippet.comment, "Scroll to Top Button");
        assert_eq!(config.snippet.exclude, ["backup", "dryrun"]);
        assert!(config.snippet.template.is_none());
        assert_eq!(config.snippet.marker_attr(), "id=\"scroll-to-top\"");
    }

    #[test]
    fn test_snippet_config_override() {
        let config = test_parse_config("[snippet]\nmarker = \"back-to-top\"\nexclude = []");
        assert_eq!(config.snippet.marker, "back-to-top");
        assert!(config.snippet.exclude.is_empty());
        // comment keeps its default
        assert_eq!(config.snippet.comment, "Scroll to Top Button");
    }
}
