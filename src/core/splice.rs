//! Locate span -> compute replacement -> splice.
//!
//! Both passes edit documents the same way: a regex bounds each candidate
//! span, a callback decides what (if anything) replaces it, and everything
//! between matches is copied through byte-for-byte.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Result of splicing replacements into a text.
#[derive(Debug)]
pub struct Spliced<'t> {
    /// Resulting text (borrowed when nothing was replaced).
    pub text: Cow<'t, str>,
    /// Number of spans the pattern matched.
    pub matched: usize,
    /// Number of spans whose replacement differs from the original.
    pub replaced: usize,
}

impl Spliced<'_> {
    /// Check if the text changed.
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }
}

/// Replace every non-overlapping match of `pattern` in `text`.
///
/// The callback returns `None` to keep the matched span as-is. Replacements
/// identical to the matched span are not counted and never force an
/// allocation, so an already-correct document comes back borrowed.
pub fn splice<'t>(
    text: &'t str,
    pattern: &Regex,
    mut replace: impl FnMut(&Captures<'t>) -> Option<String>,
) -> Spliced<'t> {
    let mut out: Option<String> = None;
    let mut last = 0;
    let mut matched = 0;
    let mut replaced = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        matched += 1;

        let Some(new) = replace(&caps).filter(|new| new != whole.as_str()) else {
            continue;
        };
        replaced += 1;

        let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 64));
        buf.push_str(&text[last..whole.start()]);
        buf.push_str(&new);
        last = whole.end();
    }

    let text = match out {
        Some(mut buf) => {
            buf.push_str(&text[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    };

    Spliced {
        text,
        matched,
        replaced,
    }
}
