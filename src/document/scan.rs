//! Document scanning (reads directory listings, never file contents).
//!
//! The walk is deliberately shallow: documents directly in the root plus one
//! level of subdirectories (`es/index.html`, `blog/post.html`). Subdirectories
//! with a reserved name prefix (`.git`, `.cache`) are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use super::DocumentError;
use crate::config::ScanConfig;
use crate::log;

/// List documents under `root`, sorted and de-duplicated.
///
/// `exclude` adds pass-specific path substrings to `scan.exclude`; both are
/// matched case-insensitively against the root-relative path.
///
/// A failure to list the root is an error; an unreadable subdirectory is
/// logged and skipped.
pub fn list_documents(
    root: &Path,
    scan: &ScanConfig,
    exclude: &[String],
) -> Result<Vec<PathBuf>, DocumentError> {
    let entries = fs::read_dir(root).map_err(|e| DocumentError::List(root.to_path_buf(), e))?;

    let mut documents = Vec::new();
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            if !scan.is_reserved_dir(&name) {
                subdirs.push(path);
            }
        } else if path.is_file() && scan.is_document(&name) {
            documents.push(path);
        }
    }

    for dir in subdirs {
        match fs::read_dir(&dir) {
            Ok(entries) => documents.extend(
                entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file())
                    .filter(|path| {
                        path.file_name()
                            .is_some_and(|name| scan.is_document(&name.to_string_lossy()))
                    }),
            ),
            Err(e) => log!("warning"; "skipping {}: {}", dir.display(), e),
        }
    }

    let excluded: Vec<String> = scan
        .exclude
        .iter()
        .chain(exclude)
        .map(|s| s.to_lowercase())
        .collect();

    documents.retain(|path| !is_excluded(root, path, &excluded));
    documents.sort();
    documents.dedup();
    Ok(documents)
}

/// Check the root-relative path (lowercased, `/`-separated) against substrings.
fn is_excluded(root: &Path, path: &Path, excluded: &[String]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase();
    excluded.iter().any(|needle| rel.contains(needle.as_str()))
}
