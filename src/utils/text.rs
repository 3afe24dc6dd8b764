//! Report text helpers.

use std::path::Path;

/// `""` for exactly one, `"s"` otherwise.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(3, "tag")` -> `"3 tags"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

/// `path` relative to `root` for display, or as-is when outside it.
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "document"), "0 documents");
        assert_eq!(plural_count(1, "document"), "1 document");
        assert_eq!(plural_count(7, "img tag"), "7 img tags");
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/site");
        assert_eq!(relative_display(root, Path::new("/site/es/index.html")), "es/index.html");
        assert_eq!(relative_display(root, Path::new("/other/a.html")), "/other/a.html");
    }
}
