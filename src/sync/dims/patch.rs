//! `width`/`height` attribute patching on a single `<img>` tag.
//!
//! Only the targeted `name=value` span changes. Every other attribute keeps
//! its text, quoting, and position, and the tag keeps its `>` or `/>` ending.

use crate::image::Dimensions;
use crate::utils::html::{Attribute, insertion_point, tag_attributes};

/// One of the two intrinsic-size attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Set both attributes, width first.
pub fn patch(tag: &str, size: Dimensions) -> String {
    let tag = set_dimension(tag, Dimension::Width, size.width);
    set_dimension(&tag, Dimension::Height, size.height)
}

/// Set one attribute on `tag`.
///
/// - numeric value present: replaced by `name="value"` (name spelling kept)
/// - value already equal: tag returned as-is
/// - non-numeric value present (`100%`, `auto`): tag returned as-is
/// - absent: ` name="value"` inserted after the last attribute; a new
///   `width` goes right before an existing `height` instead, which makes
///   the two settings commute
pub fn set_dimension(tag: &str, dim: Dimension, value: u32) -> String {
    let attrs = tag_attributes(tag);

    if let Some(attr) = attrs.iter().find(|a| a.is_named(tag, dim.name())) {
        return replace_value(tag, attr, value);
    }

    let before_height = match dim {
        Dimension::Width => attrs.iter().find(|a| a.is_named(tag, "height")),
        Dimension::Height => None,
    };

    let (at, text) = match before_height {
        Some(height) => (height.span.start, format!("{}=\"{}\" ", dim.name(), value)),
        None => (insertion_point(tag), format!(" {}=\"{}\"", dim.name(), value)),
    };

    let mut out = String::with_capacity(tag.len() + text.len());
    out.push_str(&tag[..at]);
    out.push_str(&text);
    out.push_str(&tag[at..]);
    out
}

fn replace_value(tag: &str, attr: &Attribute, value: u32) -> String {
    match parse_pixels(attr.value_str(tag)) {
        Some(current) if current != value => format!(
            "{}{}=\"{}\"{}",
            &tag[..attr.span.start],
            attr.name_str(tag),
            value,
            &tag[attr.span.end..]
        ),
        _ => tag.to_string(),
    }
}

/// Parse a plain non-negative integer attribute value.
fn parse_pixels(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::html::tag_attributes;

    const SIZE: Dimensions = Dimensions::new(400, 200);

    #[test]
    fn test_patch_inserts_both() {
        assert_eq!(
            patch(r#"<img src="pic.png">"#, SIZE),
            r#"<img src="pic.png" width="400" height="200">"#
        );
    }

    #[test]
    fn test_patch_updates_in_place() {
        assert_eq!(
            patch(r#"<img src="pic.png" width="10" height="5">"#, SIZE),
            r#"<img src="pic.png" width="400" height="200">"#
        );
        assert_eq!(
            patch(r#"<img width="10" src="pic.png" height="5" alt="">"#, SIZE),
            r#"<img width="400" src="pic.png" height="200" alt="">"#
        );
    }

    #[test]
    fn test_patch_bare_and_single_quoted_values() {
        assert_eq!(
            patch("<img src='a.png' WIDTH=10 height = '5'>", SIZE),
            r#"<img src='a.png' WIDTH="400" height="200">"#
        );
    }

    #[test]
    fn test_patch_self_closing() {
        assert_eq!(
            patch(r#"<img src="pic.png" />"#, SIZE),
            r#"<img src="pic.png" width="400" height="200" />"#
        );
        assert_eq!(
            patch(r#"<img src="pic.png"/>"#, SIZE),
            r#"<img src="pic.png" width="400" height="200"/>"#
        );
    }

    #[test]
    fn test_patch_self_closing_after_unquoted_value() {
        assert_eq!(
            patch(r#"<img src="a.png" alt=x/>"#, SIZE),
            r#"<img src="a.png" alt=x width="400" height="200"/>"#
        );
        assert_eq!(
            patch("<img src=a.png width=10/>", SIZE),
            r#"<img src=a.png width="400" height="200"/>"#
        );
    }

    #[test]
    fn test_patch_multiline_tag_keeps_layout() {
        let tag = "<img\n    src=\"pic.png\"\n    alt=\"Hero\"\n>";
        assert_eq!(
            patch(tag, SIZE),
            "<img\n    src=\"pic.png\"\n    alt=\"Hero\" width=\"400\" height=\"200\"\n>"
        );
    }

    #[test]
    fn test_patch_is_idempotent() {
        let once = patch(r#"<img src="pic.png" loading="lazy">"#, SIZE);
        assert_eq!(patch(&once, SIZE), once);
    }

    #[test]
    fn test_patch_equal_value_untouched() {
        let tag = "<img src=a.png width=400 height='200'>";
        assert_eq!(patch(tag, SIZE), tag);
    }

    #[test]
    fn test_patch_non_numeric_left_alone() {
        assert_eq!(
            patch(r#"<img src="a.png" width="100%">"#, SIZE),
            r#"<img src="a.png" width="100%" height="200">"#
        );
        assert_eq!(
            patch(r#"<img src="a.png" width="10.5" height="auto">"#, SIZE),
            r#"<img src="a.png" width="10.5" height="auto">"#
        );
    }

    #[test]
    fn test_patch_ignores_lookalike_attributes() {
        assert_eq!(
            patch(r#"<img data-width="7" style="max-width: 5px" src="a.png">"#, SIZE),
            r#"<img data-width="7" style="max-width: 5px" src="a.png" width="400" height="200">"#
        );
    }

    #[test]
    fn test_patch_preserves_existing_attributes_in_order() {
        let tag = r#"<img class="hero  wide" src="a.png" alt='A "quoted" alt' loading=lazy decoding="async">"#;
        let patched = patch(tag, SIZE);

        let before: Vec<&str> = tag_attributes(tag)
            .iter()
            .map(|a| &tag[a.span.clone()])
            .collect();
        let after: Vec<&str> = tag_attributes(&patched)
            .iter()
            .map(|a| &patched[a.span.clone()])
            .collect();

        assert_eq!(after.len(), before.len() + 2);
        assert_eq!(after[..before.len()], before[..]);
    }

    #[test]
    fn test_width_height_commute() {
        let tags = [
            r#"<img src="a.png">"#,
            r#"<img src="a.png" />"#,
            r#"<img src="a.png" width="1">"#,
            r#"<img src="a.png" height="1">"#,
            r#"<img height="1" src="a.png">"#,
            r#"<img src="a.png" width="1" height="2">"#,
            r#"<img src="a.png" height="auto">"#,
        ];
        for tag in tags {
            let width_first = set_dimension(
                &set_dimension(tag, Dimension::Width, 400),
                Dimension::Height,
                200,
            );
            let height_first = set_dimension(
                &set_dimension(tag, Dimension::Height, 200),
                Dimension::Width,
                400,
            );
            assert_eq!(width_first, height_first, "order matters for {tag}");
        }
    }

    #[test]
    fn test_parse_pixels() {
        assert_eq!(parse_pixels("400"), Some(400));
        assert_eq!(parse_pixels(" 12 "), Some(12));
        assert_eq!(parse_pixels(""), None);
        assert_eq!(parse_pixels("50%"), None);
        assert_eq!(parse_pixels("-3"), None);
    }
}
