//! `[convert]` section configuration.
//!
//! Drives the optional WebP conversion that runs before the dimension pass.
//!
//! # Example
//!
//! ```toml
//! [convert]
//! source = "assets/img"
//! extensions = ["jpg", "jpeg", "png"]
//! icon_keywords = ["logo", "icon", "favicon"]
//! icon_max_width = 300
//! max_width = 1200
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Image conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory scanned recursively (relative to the site root).
    pub source: PathBuf,

    /// Source image extensions, case-insensitive.
    pub extensions: Vec<String>,

    /// File name keywords that mark an image as a logo/icon.
    pub icon_keywords: Vec<String>,

    /// Maximum width for logos and icons.
    pub icon_max_width: u32,

    /// Maximum width for every other image.
    pub max_width: u32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/img"),
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            icon_keywords: vec!["logo".into(), "icon".into(), "favicon".into()],
            icon_max_width: 300,
            max_width: 1200,
        }
    }
}

impl ConvertConfig {
    /// Maximum width for a file, based on its name.
    pub fn max_width_for(&self, file_name: &str) -> u32 {
        let lower = file_name.to_lowercase();
        if self
            .icon_keywords
            .iter()
            .any(|keyword| lower.contains(&keyword.to_lowercase()))
        {
            self.icon_max_width
        } else {
            self.max_width
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_width == 0 {
            diag.error("convert.max_width", "must be greater than zero");
        }
        if self.icon_max_width == 0 {
            diag.error("convert.icon_max_width", "must be greater than zero");
        }
        if self
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case("webp"))
        {
            diag.error_with_hint(
                "convert.extensions",
                "webp files are conversion outputs",
                "remove `webp` from the list",
            );
        }
    }
}
