//! `[scan]` section configuration.
//!
//! Controls which documents the passes visit.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! extensions = ["html", "htm"]   # document extensions (case-insensitive)
//! skip_prefixes = [".", "_"]     # subdirectory name prefixes to skip
//! exclude = ["drafts/"]          # root-relative path substrings to skip
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Document scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Document file extensions, without the dot.
    pub extensions: Vec<String>,

    /// Subdirectories whose name starts with one of these are not scanned.
    pub skip_prefixes: Vec<String>,

    /// Root-relative path substrings (case-insensitive) excluded from every pass.
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["html".into()],
            skip_prefixes: vec![".".into()],
            exclude: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Check if a file name carries one of the document extensions.
    pub fn is_document(&self, file_name: &str) -> bool {
        file_name.rsplit_once('.').is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && self
                    .extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
        })
    }

    /// Check if a subdirectory name is reserved (hidden, system, ...).
    pub fn is_reserved_dir(&self, dir_name: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| dir_name.starts_with(prefix.as_str()))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                "scan.extensions",
                "no document extensions configured",
                "add at least one, e.g. `extensions = [\"html\"]`",
            );
        }
        if self.extensions.iter().any(|ext| ext.starts_with('.')) {
            diag.error("scan.extensions", "extensions are written without the leading dot");
        }
        if self.skip_prefixes.iter().any(String::is_empty) {
            diag.error("scan.skip_prefixes", "an empty prefix would skip every subdirectory");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_scan_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.scan.extensions, ["html"]);
        assert_eq!(config.scan.skip_prefixes, ["."]);
        assert!(config.scan.exclude.is_empty());
    }

    #[test]
    fn test_is_document() {
        let config = test_parse_config("[scan]\nextensions = [\"html\", \"htm\"]");
        assert!(config.scan.is_document("index.html"));
        assert!(config.scan.is_document("INDEX.HTM"));
        assert!(!config.scan.is_document("style.css"));
        assert!(!config.scan.is_document(".html"));
        assert!(!config.scan.is_document("html"));
    }

    #[test]
    fn test_is_reserved_dir() {
        let config = test_parse_config("[scan]\nskip_prefixes = [\".\", \"_\"]");
        assert!(config.scan.is_reserved_dir(".git"));
        assert!(config.scan.is_reserved_dir("_site"));
        assert!(!config.scan.is_reserved_dir("es"));
    }
}
