//! Quote-aware scanning helpers shared by the reader and the classifier.
//!
//! "Quoted" always means inside a span delimited by paired, non-escaped `"`
//! characters on a single line. A `"` preceded by `\` does not open or close
//! a span.

/// Byte index of the first unquoted occurrence of `needle`.
pub(crate) fn find_unquoted(text: &str, needle: char) -> Option<usize> {
    let mut in_quote = false;
    let mut prev = '\0';
    for (index, c) in text.char_indices() {
        if c == '"' && prev != '\\' {
            in_quote = !in_quote;
        } else if c == needle && !in_quote {
            return Some(index);
        }
        prev = c;
    }
    None
}

/// Byte ranges `(open, close)` of every complete quoted span, both indices
/// pointing at the delimiting quotes. The second value is false when a span
/// is left open at the end of the line.
pub(crate) fn quoted_spans(text: &str) -> (Vec<(usize, usize)>, bool) {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut prev = '\0';
    for (index, c) in text.char_indices() {
        if c == '"' && prev != '\\' {
            match open.take() {
                None => open = Some(index),
                Some(start) => spans.push((start, index)),
            }
        }
        prev = c;
    }
    (spans, open.is_none())
}

/// Resolve `\"` and `\\` escape sequences. Any other backslash is kept
/// verbatim.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
