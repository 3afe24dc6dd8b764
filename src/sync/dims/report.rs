//! Dimension pass summary.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use owo_colors::OwoColorize;

use super::DimsDocument;
use crate::sync::DocumentProblems;
use crate::utils::{plural_count, plural_s, relative_display};

/// Totals across all documents of one dimension pass.
///
/// `tags_in_updated_documents` and `tags_in_unchanged_documents` count every
/// `<img>` tag in a document, grouped by whether the document was written.
/// `tags_changed` and `tags_skipped` count individual tags. Every tag of a
/// document that is not valid UTF-8 counts as skipped.
#[derive(Debug, Default)]
pub struct DimsReport {
    pub documents_scanned: usize,
    pub documents_updated: usize,
    pub tags_in_updated_documents: usize,
    pub tags_in_unchanged_documents: usize,
    pub tags_changed: usize,
    pub tags_skipped: usize,
    /// Skipped tags grouped by document (relative path).
    pub skipped: BTreeMap<String, Vec<String>>,
    pub problems: DocumentProblems,
    /// The pass stopped early on Ctrl+C.
    pub interrupted: bool,
}

impl DimsReport {
    /// Fold one document result into the totals.
    pub fn record(&mut self, root: &Path, doc: &DimsDocument) {
        let name = relative_display(root, &doc.path);
        let outcome = &doc.outcome;

        self.documents_scanned += 1;
        if doc.lossy {
            self.tags_skipped += outcome.tags_found;
            self.problems.record_lossy(name);
            return;
        }
        if doc.written {
            self.documents_updated += 1;
            self.tags_in_updated_documents += outcome.tags_found;
        } else {
            self.tags_in_unchanged_documents += outcome.tags_found;
        }
        self.tags_changed += outcome.tags_changed;
        self.tags_skipped += outcome.skipped.len();

        if !outcome.skipped.is_empty() {
            let entries = self.skipped.entry(name.clone()).or_default();
            for skip in &outcome.skipped {
                entries.push(format!("line {}: `{}` {}", skip.line, skip.src, skip.reason));
            }
        }
    }

    /// Record a document that failed to read or write.
    pub fn record_failure(&mut self, root: &Path, path: &Path, error: &anyhow::Error) {
        self.documents_scanned += 1;
        self.problems.record_failure(root, path, error);
    }

    /// Documents read and left as they were, lossy ones excluded.
    fn documents_unchanged(&self) -> usize {
        self.documents_scanned
            - self.documents_updated
            - self.problems.lossy.len()
            - self.problems.failed.len()
    }

    /// Print skipped tags (verbose only), lossy and failed documents.
    pub fn print(&self, verbose: bool) {
        if verbose && !self.skipped.is_empty() {
            eprintln!();
            eprintln!(
                "{} {}",
                "skipped".yellow().bold(),
                format!("({} tag{})", self.tags_skipped, plural_s(self.tags_skipped)).dimmed()
            );
            for (path, entries) in &self.skipped {
                eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
                for entry in entries {
                    eprintln!("{} {}", "→".yellow(), entry);
                }
            }
        }

        self.problems.print();
    }
}

impl fmt::Display for DimsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated ({} in them), {} unchanged; {} {}, {} {}",
            plural_count(self.documents_updated, "document"),
            plural_count(self.tags_in_updated_documents, "img tag"),
            plural_count(self.documents_unchanged(), "document"),
            self.tags_changed,
            "tags changed".dimmed(),
            self.tags_skipped,
            "skipped".dimmed(),
        )?;
        if self.tags_in_unchanged_documents > 0 {
            write!(
                f,
                " {}",
                format!(
                    "({} already current)",
                    plural_count(self.tags_in_unchanged_documents, "img tag")
                )
                .dimmed()
            )?;
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
    use crate::sync::dims::{DimsOutcome, SkipReason, SkippedTag};
    use regex::Regex;
    use std::path::PathBuf;

    fn plain(text: &str) -> String {
        Regex::new(r"\x1b\[[0-9;]*m").unwrap().replace_all(text, "").into_owned()
    }

    fn doc(path: &str, found: usize, changed: usize, skipped: usize) -> DimsDocument {
        DimsDocument {
            path: PathBuf::from("/site").join(path),
            outcome: DimsOutcome {
                tags_found: found,
                tags_changed: changed,
                skipped: (0..skipped)
                    .map(|i| SkippedTag {
                        line: i + 1,
                        src: format!("https://example.com/{i}.png"),
                        reason: SkipReason::NoSource,
                    })
                    .collect(),
            },
            written: changed > 0,
            lossy: false,
        }
    }

    #[test]
    fn test_record_separates_document_and_tag_counts() {
        let root = Path::new("/site");
        let mut report = DimsReport::default();
        report.record(root, &doc("index.html", 3, 1, 1));
        report.record(root, &doc("about.html", 2, 0, 0));
        report.record(root, &doc("es/index.html", 4, 4, 0));

        assert_eq!(report.documents_scanned, 3);
        assert_eq!(report.documents_updated, 2);
        assert_eq!(report.tags_in_updated_documents, 7);
        assert_eq!(report.tags_in_unchanged_documents, 2);
        assert_eq!(report.tags_changed, 5);
        assert_eq!(report.tags_skipped, 1);
        assert_eq!(report.skipped["index.html"].len(), 1);
    }

    #[test]
    fn test_record_failure() {
        let root = Path::new("/site");
        let mut report = DimsReport::default();
        report.record_failure(root, Path::new("/site/a.html"), &anyhow::anyhow!("denied"));
        assert_eq!(report.documents_scanned, 1);
        assert_eq!(report.problems.failed["a.html"], "denied");
    }

    #[test]
    fn test_record_lossy_document_counts_as_skipped() {
        let root = Path::new("/site");
        let mut report = DimsReport::default();
        let mut latin1 = doc("latin1.html", 3, 0, 0);
        latin1.lossy = true;
        report.record(root, &latin1);
        report.record(root, &doc("index.html", 1, 1, 0));

        assert_eq!(report.documents_scanned, 2);
        assert_eq!(report.documents_updated, 1);
        assert_eq!(report.tags_skipped, 3);
        assert_eq!(report.tags_in_unchanged_documents, 0);
        assert_eq!(report.problems.lossy, ["latin1.html"]);
        assert_eq!(
            plain(&report.to_string()),
            "1 document updated (1 img tag in them), 0 documents unchanged; 1 tags changed, 3 skipped, 1 not UTF-8"
        );
    }

    #[test]
    fn test_display_counts() {
        let root = Path::new("/site");
        let mut report = DimsReport::default();
        report.record(root, &doc("index.html", 2, 2, 0));
        report.record(root, &doc("about.html", 1, 0, 0));
        assert_eq!(
            plain(&report.to_string()),
            "1 document updated (2 img tags in them), 1 document unchanged; 2 tags changed, 0 skipped (1 img tag already current)"
        );
    }
}
