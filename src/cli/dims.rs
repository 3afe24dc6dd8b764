//! `dims` command: WebP conversion, then the Dimension Sync Pass.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::convert::run_convert;
use crate::config::SyncConfig;
use crate::core::is_shutdown;
use crate::document::list_documents;
use crate::image::FileProbe;
use crate::logger::{ProgressLine, is_verbose};
use crate::sync::dims::{DimensionSync, DimsReport};
use crate::utils::plural_count;
use crate::{debug, log};

/// Run the `dims` command.
pub fn run_dims(config: &SyncConfig, html_only: bool) -> Result<()> {
    if html_only {
        debug!("convert"; "skipped (--html-only)");
    } else {
        run_convert(config);
    }

    let report = sync_dimensions(config)?;
    report.print(is_verbose());

    if report.interrupted {
        log!("warning"; "interrupted, remaining documents untouched");
    }
    log!("done"; "{}", report);
    Ok(())
}

/// Run the Dimension Sync Pass over every document under the root.
pub fn sync_dimensions(config: &SyncConfig) -> Result<DimsReport> {
    let root = config.get_root();
    let documents = list_documents(root, &config.scan, &[])?;
    let mut report = DimsReport::default();

    if documents.is_empty() {
        log!("dims"; "no documents found");
        return Ok(report);
    }
    log!("dims"; "syncing image dimensions in {}", plural_count(documents.len(), "document"));

    let probe = FileProbe;
    let sync = DimensionSync::new(root, &probe);
    let progress = ProgressLine::new("dims", &[("documents", documents.len())]);

    for path in &documents {
        if is_shutdown() {
            report.interrupted = true;
            break;
        }

        match sync.sync_document(path) {
            Ok(doc) => {
                let name = config.root_relative(path);
                if doc.lossy {
                    log!("warning"; "{} is not valid UTF-8, left unwritten", name.display());
                }
                if doc.written {
                    debug!("dims"; "{} {}", name.display(),
                        format!("({} of {} tags changed)", doc.outcome.tags_changed, doc.outcome.tags_found).dimmed());
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
