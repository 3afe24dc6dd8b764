//! Path normalization utilities.
//!
//! - `normalize_path` - canonicalize a user-supplied path (root, config file)
//! - `normalize_lexical` - collapse `.`/`..` without touching the file system

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Collapse `.` and `..` segments lexically.
///
/// Mirrors how a browser resolves `../img/a.png` against a page URL:
/// `..` past the filesystem root is dropped instead of failing.
///
/// # Example
/// ```ignore
/// assert_eq!(normalize_lexical(Path::new("/site/en/../img/a.png")), PathBuf::from("/site/img/a.png"));
/// ```
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
