//! Configuration management for `pagesync.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [scan], [snippet], [convert]
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! └── mod.rs         # SyncConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[scan]`    | Document extensions, skipped dirs, exclusions    |
//! | `[snippet]` | Marker id/comment, canonical template, excludes  |
//! | `[convert]` | WebP conversion source dir and max widths        |
//!
//! The config file is optional: without one every section uses its defaults.
//! The loaded value is immutable and passed by reference into each pass.

mod error;
pub mod section;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{ConvertConfig, ScanConfig, SnippetConfig};

use crate::{cli::Cli, debug, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagesync.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Site root: documents and site-root image references resolve against it (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Document scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Snippet Canonicalizer settings
    #[serde(default)]
    pub snippet: SnippetConfig,

    /// Image conversion settings
    #[serde(default)]
    pub convert: ConvertConfig,
}

impl SyncConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Fails before anything else if the site root is missing. The config
    /// file is looked up relative to the root and may be absent.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = Self::resolve_root(cli.root.as_deref())?;

        let config_path = if cli.config.is_absolute() {
            cli.config.clone()
        } else {
            root.join(&cli.config)
        };

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Expand `~`, then require an existing directory.
    fn resolve_root(root: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let root = match root {
            Some(path) => {
                PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
            }
            None => std::env::current_dir().unwrap_or_default(),
        };

        if !root.is_dir() {
            return Err(ConfigError::RootMissing(root));
        }
        Ok(crate::utils::path::normalize_path(&root))
    }

    /// Anchor relative paths at the root.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.convert.source = root.join(&self.convert.source);
        if let Some(template) = self.snippet.template.take() {
            self.snippet.template = Some(root.join(template));
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored):", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate every section, reporting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.scan.validate(&mut diag);
        self.snippet.validate(&mut diag);
        self.convert.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the site root (for display)
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text. Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SyncConfig {
    let (parsed, ignored) = SyncConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a config rooted at `root` with default sections.
#[cfg(test)]
pub fn test_config_at(root: &Path, content: &str) -> SyncConfig {
    let mut config = test_parse_config(content);
    config.finalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================
