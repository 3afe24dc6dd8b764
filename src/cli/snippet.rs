//! `snippet` command: the Snippet Canonicalizer.

use anyhow::{Context, Result};

use crate::config::SyncConfig;
use crate::core::is_shutdown;
use crate::document::list_documents;
use crate::logger::ProgressLine;
use crate::sync::snippet::{SnippetCanonicalizer, SnippetReport, SnippetState};
use crate::utils::plural_count;
use crate::{debug, log};

/// Run the `snippet` command.
pub fn run_snippet(config: &SyncConfig) -> Result<()> {
    let report = canonicalize_snippets(config)?;
    report.print();

    if report.interrupted {
        log!("warning"; "interrupted, remaining documents untouched");
    }
    log!("done"; "{}", report);
    Ok(())
}

/// Canonicalize the snippet in every document under the root.
pub fn canonicalize_snippets(config: &SyncConfig) -> Result<SnippetReport> {
    let canonicalizer =
        SnippetCanonicalizer::new(&config.snippet).context("failed to prepare snippet")?;

    let root = config.get_root();
    let documents = list_documents(root, &config.scan, &config.snippet.exclude)?;
    let mut report = SnippetReport::default();

    if documents.is_empty() {
        log!("snippet"; "no documents found");
        return Ok(report);
    }
    log!("snippet"; "checking {}", plural_count(documents.len(), "document"));

    let progress = ProgressLine::new("snippet", &[("documents", documents.len())]);

    for path in &documents {
        if is_shutdown() {
            report.interrupted = true;
            break;
        }

        match canonicalizer.canonicalize_document(path) {
            Ok(doc) => {
                let name = config.root_relative(path);
                if doc.lossy {
                    log!("warning"; "{} is not valid UTF-8, left unwritten", name.display());
                }
                match doc.state {
                    SnippetState::Mismatch => {
                        log!("warning"; "{}: marker found but block not recognized", name.display());
                    }
                    SnippetState::Replaced { blocks } => {
                        debug!("snippet"; "{}: replaced {}", name.display(), plural_count(blocks, "block"));
                    }
                    _ => {}
                }
                report.record(root, &doc);
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log!("error"; "{:#}", e);
                report.record_failure(root, path, &e);
            }
        }
        progress.inc("documents");
    }

    progress.finish();
    Ok(report)
}
