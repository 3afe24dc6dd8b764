//! Snippet pass summary.

use std::fmt;
use std::path::Path;

use owo_colors::OwoColorize;

use super::{SnippetDocument, SnippetState};
use crate::sync::DocumentProblems;
use crate::utils::{plural_count, relative_display};

#[derive(Debug, Default)]
pub struct SnippetReport {
    pub documents_scanned: usize,
    /// Documents containing the marker attribute.
    pub with_marker: usize,
    pub documents_updated: usize,
    pub blocks_replaced: usize,
    /// Documents whose blocks already matched.
    pub already_canonical: usize,
    /// Marker present, block layout not recognized.
    pub mismatched: Vec<String>,
    pub problems: DocumentProblems,
    pub interrupted: bool,
}

impl SnippetReport {
    pub fn record(&mut self, root: &Path, doc: &SnippetDocument) {
        let name = relative_display(root, &doc.path);

        self.documents_scanned += 1;
        if doc.state.has_marker() {
            self.with_marker += 1;
        }
        match doc.state {
            SnippetState::Replaced { blocks } if doc.written => {
                self.documents_updated += 1;
                self.blocks_replaced += blocks;
            }
            SnippetState::Canonical => self.already_canonical += 1,
            SnippetState::Mismatch => self.mismatched.push(name.clone()),
            _ => {}
        }
        if doc.lossy {
            self.problems.record_lossy(name);
        }
    }

    pub fn record_failure(&mut self, root: &Path, path: &Path, error: &anyhow::Error) {
        self.documents_scanned += 1;
        self.problems.record_failure(root, path, error);
    }

    /// Print mismatched, lossy and failed documents.
    pub fn print(&self) {
        if !self.mismatched.is_empty() {
            eprintln!();
            eprintln!(
                "{} {}",
                "marker found, block not recognized".yellow().bold(),
                format!("({})", plural_count(self.mismatched.len(), "document")).dimmed()
            );
            for path in &self.mismatched {
                eprintln!("{} {}", "→".yellow(), path);
            }
        }

        self.problems.print();
    }
}

impl fmt::Display for SnippetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} with the button, {} updated",
            plural_count(self.with_marker, "page"),
            self.documents_scanned,
            self.documents_updated,
        )?;
        if self.blocks_replaced != self.documents_updated {
            write!(
                f,
                " {}",
                format!("({})", plural_count(self.blocks_replaced, "block")).dimmed()
            )?;
        }
        if self.already_canonical > 0 {
            write!(f, ", {} {}", self.already_canonical, "already canonical".dimmed())?;
        }
        let lossy = self.problems.lossy.len();
        if lossy > 0 {
            write!(f, ", {} {}", lossy.to_string().yellow().bold(), "not UTF-8".dimmed())?;
        }
        let failed = self.problems.failed.len();
        if failed > 0 {
            write!(f, ", {} {}", failed.to_string().red().bold(), "failed".dimmed())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::path::PathBuf;

    fn plain(text: &str) -> String {
        Regex::new(r"\x1b\[[0-9;]*m").unwrap().replace_all(text, "").into_owned()
    }

    fn doc(path: &str, state: SnippetState) -> SnippetDocument {
        SnippetDocument {
            path: PathBuf::from("/site").join(path),
            state,
            written: matches!(state, SnippetState::Replaced { .. }),
            lossy: false,
        }
    }

    #[test]
    fn test_record_states() {
        let root = Path::new("/site");
        let mut report = SnippetReport::default();
        report.record(root, &doc("a.html", SnippetState::NoMarker));
        report.record(root, &doc("b.html", SnippetState::Replaced { blocks: 2 }));
        report.record(root, &doc("c.html", SnippetState::Canonical));
        report.record(root, &doc("es/d.html", SnippetState::Mismatch));

        assert_eq!(report.documents_scanned, 4);
        assert_eq!(report.with_marker, 3);
        assert_eq!(report.documents_updated, 1);
        assert_eq!(report.blocks_replaced, 2);
        assert_eq!(report.already_canonical, 1);
        assert_eq!(report.mismatched, ["es/d.html"]);
    }

    #[test]
    fn test_record_lossy_is_not_updated() {
        let root = Path::new("/site");
        let mut report = SnippetReport::default();
        report.record(
            root,
            &SnippetDocument {
                path: PathBuf::from("/site/latin1.html"),
                state: SnippetState::Replaced { blocks: 1 },
                written: false,
                lossy: true,
            },
        );
        assert_eq!(report.with_marker, 1);
        assert_eq!(report.documents_updated, 0);
        assert_eq!(report.blocks_replaced, 0);
        assert_eq!(report.problems.lossy, ["latin1.html"]);
    }

    #[test]
    fn test_display() {
        let root = Path::new("/site");
        let mut report = SnippetReport::default();
        report.record(root, &doc("a.html", SnippetState::Replaced { blocks: 1 }));
        report.record(root, &doc("b.html", SnippetState::Canonical));
        report.record(root, &doc("c.html", SnippetState::NoMarker));
        report.record_failure(root, Path::new("/site/d.html"), &anyhow::anyhow!("denied"));
        assert_eq!(
            plain(&report.to_string()),
            "2 pages of 4 with the button, 1 updated, 1 already canonical, 1 failed"
        );
    }
}
