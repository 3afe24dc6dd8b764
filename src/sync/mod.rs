//! Document passes.
//!
//! | Pass      | Edits                                   |
//! |-----------|-----------------------------------------|
//! | `dims`    | `width`/`height` on `<img>` tags        |
//! | `snippet` | the scroll-to-top button block          |
//!
//! Both read a document once, compute the new text without touching the
//! file, and write at most once. A document that is not valid UTF-8 is
//! never written.

pub mod dims;
pub mod snippet;

use std::collections::BTreeMap;
use std::path::Path;

use owo_colors::OwoColorize;

use crate::utils::relative_display;

/// Documents a pass could not handle, keyed by root-relative name.
#[derive(Debug, Default)]
pub struct DocumentProblems {
    /// Not valid UTF-8: scanned but left unwritten.
    pub lossy: Vec<String>,
    /// Could not be read or written, with the error.
    pub failed: BTreeMap<String, String>,
}

impl DocumentProblems {
    pub fn record_lossy(&mut self, name: String) {
        self.lossy.push(name);
    }

    pub fn record_failure(&mut self, root: &Path, path: &Path, error: &anyhow::Error) {
        self.failed
            .insert(relative_display(root, path), format!("{error:#}"));
    }

    pub fn print(&self) {
        if !self.lossy.is_empty() {
            eprintln!();
            eprintln!("{}", "not valid UTF-8, left unwritten".yellow().bold());
            for path in &self.lossy {
                eprintln!("{} {}", "→".yellow(), path);
            }
        }

        if !self.failed.is_empty() {
            eprintln!();
            eprintln!("{}", "failed".red().bold());
            for (path, error) in &self.failed {
                eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
                eprintln!("{} {}", "→".red(), error);
            }
        }
    }
}
