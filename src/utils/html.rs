//! HTML start-tag utilities.
//!
//! Works on the raw text of a single start tag (`<img src="a.png" alt=x />`)
//! and reports byte spans instead of owned strings, so callers can splice
//! replacements into the original text without re-serializing anything:
//! - `tag_attributes()` - attribute tokenizer with spans
//! - `find_attribute()` - case-insensitive lookup by name
//! - `insertion_point()` - where a new attribute goes

use std::ops::Range;

/// One attribute inside a start tag, as byte ranges into the tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: Range<usize>,
    /// Attribute value without surrounding quotes (`None` for boolean attributes).
    pub value: Option<Range<usize>>,
    /// Whole `name=value` span, quotes included.
    pub span: Range<usize>,
}

impl Attribute {
    /// Check the attribute name, ignoring ASCII case.
    #[inline]
    pub fn is_named(&self, tag: &str, name: &str) -> bool {
        tag[self.name.clone()].eq_ignore_ascii_case(name)
    }

    /// Borrow the name text.
    #[inline]
    pub fn name_str<'t>(&self, tag: &'t str) -> &'t str {
        &tag[self.name.clone()]
    }

    /// Borrow the value text (empty for boolean attributes).
    #[inline]
    pub fn value_str<'t>(&self, tag: &'t str) -> &'t str {
        self.value.clone().map_or("", |range| &tag[range])
    }
}

/// Tokenize the attributes of a start tag.
///
/// Input: `<img src="a.png" alt='x y' width=10 hidden>`
/// Output: spans for `src`, `alt`, `width`, `hidden` in source order.
///
/// Follows the browser tokenizer loosely: unquoted values run until
/// whitespace or the tag terminator, an unterminated quote runs to the end
/// of the tag.
pub fn tag_attributes(tag: &str) -> Vec<Attribute> {
    let bytes = tag.as_bytes();
    let end = tag_body_end(bytes);
    let mut attrs = Vec::new();

    let mut i = element_name_end(bytes, end);

    while i < end {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b'/' {
            i += 1;
            continue;
        }

        // Read attribute name
        let name_start = i;
        i += 1;
        while i < end && !matches!(bytes[i], b'=' | b'/') && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name = name_start..i;

        // Skip whitespace before a possible `=`
        let mut j = i;
        while j < end && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        if j < end && bytes[j] == b'=' {
            j += 1;
            while j < end && bytes[j].is_ascii_whitespace() {
                j += 1;
            }

            let (value, span_end) = if j < end && matches!(bytes[j], b'"' | b'\'') {
                let quote = bytes[j];
                let value_start = j + 1;
                let value_end = bytes[value_start..end]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(end, |p| value_start + p);
                let span_end = (value_end + 1).min(end);
                (value_start..value_end, span_end)
            } else {
                let value_start = j;
                while j < end && !bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                (value_start..j, j)
            };

            attrs.push(Attribute {
                name: name.clone(),
                value: Some(value),
                span: name.start..span_end,
            });
            i = span_end;
        } else {
            // Boolean attribute (no value)
            attrs.push(Attribute {
                name: name.clone(),
                value: None,
                span: name,
            });
        }
    }

    attrs
}

/// Find the first attribute with the given name (ASCII case-insensitive).
pub fn find_attribute(tag: &str, name: &str) -> Option<Attribute> {
    tag_attributes(tag)
        .into_iter()
        .find(|attr| attr.is_named(tag, name))
}

/// Byte offset where a new attribute belongs: right after the last
/// existing attribute, or after the element name when there is none.
///
/// Whitespace and `/>` after that point stay where they are.
pub fn insertion_point(tag: &str) -> usize {
    tag_attributes(tag).last().map_or_else(
        || {
            let bytes = tag.as_bytes();
            element_name_end(bytes, tag_body_end(bytes))
        },
        |attr| attr.span.end,
    )
}

/// Skip `<` and the element name.
fn element_name_end(bytes: &[u8], end: usize) -> usize {
    let mut i = usize::from(bytes.first() == Some(&b'<'));
    while i < end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'/' {
        i += 1;
    }
    i
}

/// Byte offset of the tag terminator: the final `>`, or `/>`.
///
/// A `/` right before `>` always closes the tag, even after an unquoted
/// value: `<img alt=x/>` has `alt` = `x` and keeps its `/>` ending when
/// attributes are added.
pub fn tag_body_end(bytes: &[u8]) -> usize {
    let mut end = bytes.len();
    if bytes.last() == Some(&b'>') {
        end -= 1;
    }
    if end > 0 && bytes[end - 1] == b'/' {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tag: &str) -> Vec<&str> {
        tag_attributes(tag)
            .iter()
            .map(|a| a.name_str(tag))
            .collect()
    }

    #[test]
    fn test_tag_attributes_mixed_quoting() {
        let tag = r#"<img src="a.png" alt='x y' width=10 hidden>"#;
        let attrs = tag_attributes(tag);
        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs[0].value_str(tag), "a.png");
        assert_eq!(&tag[attrs[0].span.clone()], r#"src="a.png""#);
        assert_eq!(attrs[1].value_str(tag), "x y");
        assert_eq!(&tag[attrs[1].span.clone()], "alt='x y'");
        assert_eq!(attrs[2].value_str(tag), "10");
        assert_eq!(attrs[3].value, None);
        assert_eq!(&tag[attrs[3].span.clone()], "hidden");
    }

    #[test]
    fn test_tag_attributes_spans_cover_name_and_value() {
        let tag = r#"<img  src = "a.png"  width='3'>"#;
        let attrs = tag_attributes(tag);
        assert_eq!(&tag[attrs[0].span.clone()], r#"src = "a.png""#);
        assert_eq!(&tag[attrs[1].span.clone()], "width='3'");
    }

    #[test]
    fn test_tag_attributes_self_closing() {
        assert_eq!(names(r#"<img src="a.png"/>"#), ["src"]);
        assert_eq!(names(r#"<img src="a.png" />"#), ["src"]);
        assert_eq!(names("<img/>"), Vec::<&str>::new());
    }

    #[test]
    fn test_tag_attributes_unquoted_value_before_self_close() {
        let tag = "<img src=a/b.png alt=x/>";
        let attrs = tag_attributes(tag);
        assert_eq!(attrs[0].value_str(tag), "a/b.png");
        assert_eq!(attrs[1].value_str(tag), "x");
        assert_eq!(&tag[..insertion_point(tag)], "<img src=a/b.png alt=x");
    }

    #[test]
    fn test_tag_attributes_ignores_names_inside_values() {
        let tag = r#"<img alt="width=5" data-width="7" style="max-width: 10px" src="a.png">"#;
        assert_eq!(names(tag), ["alt", "data-width", "style", "src"]);
        assert!(find_attribute(tag, "width").is_none());
    }

    #[test]
    fn test_tag_attributes_multiline() {
        let tag = "<img\n    src=\"a.png\"\n    alt=\"\"\n>";
        assert_eq!(names(tag), ["src", "alt"]);
    }

    #[test]
    fn test_find_attribute_case_insensitive() {
        let tag = r#"<IMG SRC="a.png" Width="4">"#;
        let width = find_attribute(tag, "width").unwrap();
        assert_eq!(width.name_str(tag), "Width");
        assert_eq!(width.value_str(tag), "4");
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let tag = r#"<img src="a.png>"#;
        let src = find_attribute(tag, "src").unwrap();
        assert_eq!(src.value_str(tag), "a.png");
    }

    #[test]
    fn test_insertion_point() {
        let tag = r#"<img src="a.png" />"#;
        assert_eq!(&tag[..insertion_point(tag)], r#"<img src="a.png""#);
        assert_eq!(insertion_point("<img>"), 4);
        assert_eq!(insertion_point("<img/>"), 4);
    }
}
