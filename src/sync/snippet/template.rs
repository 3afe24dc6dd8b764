//! Canonical snippet markup.

use std::fs;
use std::path::Path;

use crate::config::SnippetConfig;

/// The one true version of the control, stored without outer indentation.
///
/// The first line is the marker comment, the last line closes the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSnippet {
    markup: String,
}

impl CanonicalSnippet {
    /// Use the configured template file, or the built-in markup.
    pub fn load(config: &SnippetConfig) -> std::io::Result<Self> {
        match &config.template {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin(&config.marker, &config.comment)),
        }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        fs::read_to_string(path).map(Self::new)
    }

    pub fn new(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let trimmed = markup.trim_matches(['\r', '\n']);
        Self {
            markup: trimmed.to_string(),
        }
    }

    /// Scroll-to-top button with progress ring, icon and tooltip.
    pub fn builtin(marker: &str, comment: &str) -> Self {
        Self::new(format!(
            r#"<!-- {comment} -->
<button id="{marker}" class="scroll-to-top-btn" type="button" title="Back to top" aria-label="Back to top" aria-describedby="{marker}-tooltip">
    <svg class="scroll-progress-ring" viewBox="0 0 47 47" width="47" height="47" aria-hidden="true" focusable="false">
        <circle class="scroll-progress-track" cx="23.5" cy="23.5" r="22" fill="none" stroke="currentColor" stroke-width="3"></circle>
        <circle class="scroll-progress-circle" cx="23.5" cy="23.5" r="22" fill="none" stroke="currentColor" stroke-width="3" stroke-linecap="round"></circle>
    </svg>
    <svg class="scroll-to-top-icon" viewBox="0 0 24 24" width="24" height="24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true" focusable="false">
        <path d="M18 15l-6-6-6 6"></path>
    </svg>
    <div id="{marker}-tooltip" class="scroll-to-top-btn-tooltip" role="tooltip">Back to top</div>
</button>"#
        ))
    }

    #[cfg(test)]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Indent every non-blank line by `indent`, join with `eol`, and end
    /// with one trailing `eol`.
    pub fn render(&self, indent: &str, eol: &str) -> String {
        let mut out = String::with_capacity(self.markup.len() + 16 * indent.len());
        for line in self.markup.lines() {
            if !line.trim().is_empty() {
                out.push_str(indent);
            }
            out.push_str(line);
            out.push_str(eol);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_shape() {
        let snippet = CanonicalSnippet::builtin("scroll-to-top", "Scroll to Top Button");
        let lines: Vec<_> = snippet.markup().lines().collect();
        assert_eq!(lines.first(), Some(&"<!-- Scroll to Top Button -->"));
        assert!(lines[1].starts_with(r#"<button id="scroll-to-top" "#));
        assert_eq!(lines.last(), Some(&"</button>"));
        assert_eq!(lines.len(), 11);
        assert!(snippet.markup().contains(r#"aria-describedby="scroll-to-top-tooltip""#));
    }

    #[test]
    fn test_render_indents_non_blank_lines() {
        let snippet = CanonicalSnippet::new("<a>\n\n  <b></b>\n</a>\n");
        assert_eq!(snippet.render("    ", "\n"), "    <a>\n\n      <b></b>\n    </a>\n");
    }

    #[test]
    fn test_render_crlf() {
        let snippet = CanonicalSnippet::new("<a>\r\n</a>");
        assert_eq!(snippet.render("\t", "\r\n"), "\t<a>\r\n\t</a>\r\n");
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scroll.html");
        fs::write(&path, "\n<!-- x -->\n<button id=\"top\"></button>\n\n").unwrap();

        let snippet = CanonicalSnippet::from_file(&path).unwrap();
        assert_eq!(snippet.markup(), "<!-- x -->\n<button id=\"top\"></button>");
    }

    #[test]
    fn test_load_prefers_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scroll.html");
        fs::write(&path, "<button id=\"top\"></button>").unwrap();

        let mut config = SnippetConfig::default();
        assert_eq!(
            CanonicalSnippet::load(&config).unwrap(),
            CanonicalSnippet::builtin("scroll-to-top", "Scroll to Top Button")
        );
        config.template = Some(path);
        assert_eq!(
            CanonicalSnippet::load(&config).unwrap().markup(),
            "<button id=\"top\"></button>"
        );
    }
}
