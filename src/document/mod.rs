//! Documents: text buffers identified by their path.
//!
//! A document is read once at the start of a pass and committed at most once
//! at the end. `commit` only touches the file when the text actually changed,
//! so a clean re-run leaves every modification time alone. Files that are not
//! valid UTF-8 are read for reporting but never committed.

mod scan;

pub use scan::list_documents;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Per-document I/O failures. The batch logs them and moves on.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("failed to list `{0}`")]
    List(PathBuf, #[source] std::io::Error),
}

/// An HTML document loaded into memory.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    text: String,
    /// Invalid UTF-8 was replaced with U+FFFD while decoding.
    lossy: bool,
}

impl Document {
    /// Read a document as UTF-8, falling back to a replacement-character decode.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|e| DocumentError::Read(path.to_path_buf(), e))?;

        let (text, lossy) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(err) => (
                String::from_utf8_lossy(err.as_bytes()).into_owned(),
                true,
            ),
        };

        Ok(Self {
            path: path.to_path_buf(),
            text,
            lossy,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text as read at the start of the pass.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub const fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// Write `new_text` back if and only if it differs from what was read.
    ///
    /// A lossy decode is never written, or every invalid byte would turn
    /// into U+FFFD on disk. Returns whether the file was written.
    pub fn commit(&self, new_text: &str) -> Result<bool, DocumentError> {
        if self.lossy || new_text == self.text {
            return Ok(false);
        }
        fs::write(&self.path, new_text)
            .map_err(|e| DocumentError::Write(self.path.clone(), e))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>héllo</p>").unwrap();

        let doc = Document::read(&path).unwrap();
        assert_eq!(doc.text(), "<p>héllo</p>");
        assert!(!doc.is_lossy());
        assert_eq!(doc.path(), path);
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.html");
        fs::write(&path, b"<p>caf\xe9</p>").unwrap();

        let doc = Document::read(&path).unwrap();
        assert!(doc.is_lossy());
        assert_eq!(doc.text(), "<p>caf\u{FFFD}</p>");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Document::read(&dir.path().join("missing.html")).unwrap_err();
        assert!(matches!(err, DocumentError::Read(..)));
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_commit_unchanged_keeps_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>same</p>").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let doc = Document::read(&path).unwrap();
        assert!(!doc.commit("<p>same</p>").unwrap());

        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_commit_changed_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>old</p>").unwrap();

        let doc = Document::read(&path).unwrap();
        assert!(doc.commit("<p>new</p>").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>new</p>");
    }

    #[test]
    fn test_commit_lossy_keeps_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.html");
        fs::write(&path, b"<p>caf\xe9</p>").unwrap();

        let doc = Document::read(&path).unwrap();
        assert!(!doc.commit("<p>caf\u{FFFD}</p><p>new</p>").unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"<p>caf\xe9</p>");
    }
}
