//! Logical-line classification and splitting.
//!
//! Walks the reader's line buffer in order and assigns every surviving line
//! exactly one [`LineKind`]. Composite lines are expanded in place: a dash
//! followed by inline content becomes two logical lines, and a mapping entry
//! with an inline value gets its value split onto a pre-classified scalar
//! line. Block-scalar continuations run the other way and are merged into a
//! single scalar line and removed from the buffer.

use std::mem;

use crate::error::{Error, Result};
use crate::lexing::scan;
use crate::lexing::{LineKind, ReaderLine};

/// Classify every line in the buffer, expanding and merging as needed.
pub(crate) fn classify_lines(lines: &mut Vec<ReaderLine>) -> Result<()> {
    let mut index = 0;
    while index < lines.len() {
        if lines[index].kind != LineKind::Unset {
            index += 1;
            continue;
        }

        if index > 0
            && lines[index - 1].has_block_flags()
            && lines[index].offset > lines[index - 1].offset
        {
            merge_block_scalar(lines, index);
        } else if is_sequence_start(&lines[index].text) {
            split_sequence_entry(lines, index);
        } else if let Some(colon) = scan::find_unquoted(&lines[index].text, ':') {
            classify_mapping_entry(lines, index, colon)?;
        } else {
            lines[index].kind = LineKind::Scalar;
        }
        index += 1;
    }

    // A document must not end in the middle of a collection header.
    if let Some(last) = lines.last() {
        if last.kind != LineKind::Scalar {
            return Err(Error::parsing("unexpected document end", last.no));
        }
    }
    Ok(())
}

/// A sequence entry is a dash followed by end-of-line or a space.
fn is_sequence_start(text: &str) -> bool {
    text.starts_with('-') && (text.len() == 1 || text.as_bytes()[1] == b' ')
}

/// Accumulate a block scalar introduced by the previous line's `|`/`>`
/// indicator. Raw lines more indented than the indicator's line are joined
/// into this one and removed from the buffer.
fn merge_block_scalar(lines: &mut Vec<ReaderLine>, index: usize) {
    let owner_offset = lines[index - 1].offset;
    let literal = lines[index - 1].literal_block;
    let ends_with_newline = lines[index - 1].ends_with_newline;
    let separator = if literal { '\n' } else { ' ' };
    let base_offset = lines[index].offset;

    let mut text = mem::take(&mut lines[index].text);
    while index + 1 < lines.len() && lines[index + 1].offset > owner_offset {
        let continuation = lines.remove(index + 1);
        text.push(separator);
        // Re-create indentation relative to the first content line.
        for _ in base_offset..continuation.offset {
            text.push(' ');
        }
        text.push_str(&continuation.text);
    }
    if ends_with_newline {
        text.push('\n');
    }

    let line = &mut lines[index];
    line.text = text;
    line.kind = LineKind::Scalar;
}

/// Tag the dash line and, when content follows the dash, split that content
/// onto a fresh line right after it for re-classification.
fn split_sequence_entry(lines: &mut Vec<ReaderLine>, index: usize) {
    lines[index].kind = LineKind::SequenceEntry;
    let content = lines[index].text[1..]
        .find(|c| c != ' ' && c != '\t')
        .map(|found| found + 1);
    if let Some(start) = content {
        let no = lines[index].no;
        let offset = lines[index].offset + start;
        let text = lines[index].text[start..].to_string();
        // The dash line itself carries no payload after the split.
        lines[index].text.truncate(1);
        lines.insert(index + 1, ReaderLine::new(text, no, offset));
    }
}

/// Split a line at its first unquoted colon into a key line and, depending
/// on the value text, a scalar value line, a pending block-scalar indicator,
/// or a synthesized empty value.
fn classify_mapping_entry(lines: &mut Vec<ReaderLine>, index: usize, colon: usize) -> Result<()> {
    let no = lines[index].no;
    let offset = lines[index].offset;
    let text = mem::take(&mut lines[index].text);

    let key = resolve_key(text[..colon].trim(), no)?;
    let after = &text[colon + 1..];
    let value = after.trim();
    // Column of the trimmed value, relative to the line's first character.
    let value_pos = colon + 1 + (after.len() - after.trim_start().len());

    lines[index].kind = LineKind::MappingEntry;
    lines[index].text = key;

    if is_sequence_start(value) {
        return Err(Error::parsing("block sequence not allowed here", no));
    }

    match value {
        "|" => {
            lines[index].literal_block = true;
            lines[index].ends_with_newline = true;
        }
        ">" => {
            lines[index].folded_block = true;
            lines[index].ends_with_newline = true;
        }
        "|-" => lines[index].literal_block = true,
        ">-" => lines[index].folded_block = true,
        "" => {
            // `key:` with nothing nested beneath it is an explicit empty
            // value.
            let nested = lines.get(index + 1).is_some_and(|next| next.offset > offset);
            if !nested {
                let mut empty = ReaderLine::new(String::new(), no, offset + 2);
                empty.kind = LineKind::Scalar;
                lines.insert(index + 1, empty);
            }
        }
        _ => {
            let mut scalar = ReaderLine::new(unquote_value(value, no)?, no, offset + value_pos);
            scalar.kind = LineKind::Scalar;
            lines.insert(index + 1, scalar);
        }
    }
    Ok(())
}

/// Validate and resolve the key text. A quoted span must cover the entire
/// key, and at most one span is allowed.
fn resolve_key(raw: &str, no: usize) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::parsing("missing map key", no));
    }
    let (spans, balanced) = scan::quoted_spans(raw);
    if !balanced || spans.len() > 1 {
        return Err(Error::parsing("key incorrect", no));
    }
    match spans.first() {
        Some(&(open, close)) => {
            if open != 0 || close != raw.len() - 1 {
                return Err(Error::parsing("key incorrect", no));
            }
            Ok(scan::unescape(&raw[1..close]))
        }
        None => Ok(raw.to_string()),
    }
}

/// Strip one layer of surrounding double quotes. An opening quote with no
/// matching closing quote is malformed.
fn unquote_value(value: &str, no: usize) -> Result<String> {
    if !value.starts_with('"') {
        return Ok(value.to_string());
    }
    let closed = value.len() >= 2 && value.ends_with('"') && !value.ends_with("\\\"");
    if !closed {
        return Err(Error::parsing("invalid quoting of scalar", no));
    }
    Ok(scan::unescape(&value[1..value.len() - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexing::reader::read_lines;

    fn classified(source: &str) -> Vec<ReaderLine> {
        let mut lines = read_lines(source.as_bytes()).unwrap();
        classify_lines(&mut lines).unwrap();
        lines
    }

    fn classify_error(source: &str) -> Error {
        let mut lines = read_lines(source.as_bytes()).unwrap();
        classify_lines(&mut lines).unwrap_err()
    }

    #[test]
    fn test_mapping_entry_splits_value_line() {
        let lines = classified("a: 1\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, LineKind::MappingEntry);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].kind, LineKind::Scalar);
        assert_eq!(lines[1].text, "1");
        assert_eq!(lines[1].offset, 3);
        assert_eq!(lines[1].no, 1);
    }

    #[test]
    fn test_sequence_entry_splits_content() {
        let lines = classified("-   x\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, LineKind::SequenceEntry);
        assert_eq!(lines[0].text, "-");
        assert_eq!(lines[1].text, "x");
        assert_eq!(lines[1].offset, 4);
    }

    #[test]
    fn test_dash_without_space_is_a_scalar() {
        let lines = classified("-x\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::Scalar);
        assert_eq!(lines[0].text, "-x");
    }

    #[test]
    fn test_empty_value_synthesizes_scalar() {
        let lines = classified("a:\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].kind, LineKind::Scalar);
        assert_eq!(lines[1].text, "");
    }

    #[test]
    fn test_empty_value_with_nested_content_is_left_alone() {
        let lines = classified("a:\n  b: 1\n");
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].kind, LineKind::MappingEntry);
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn test_literal_block_merges_with_newlines() {
        let lines = classified("text: |\n  line1\n  line2\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].kind, LineKind::Scalar);
        assert_eq!(lines[1].text, "line1\nline2\n");
    }

    #[test]
    fn test_literal_block_preserves_relative_indentation() {
        let lines = classified("text: |-\n  first\n    deeper\n");
        assert_eq!(lines[1].text, "first\n  deeper");
    }

    #[test]
    fn test_folded_block_joins_with_spaces() {
        let lines = classified("text: >-\n  one\n  two\n");
        assert_eq!(lines[1].text, "one two");
    }

    #[test]
    fn test_folded_block_keeps_trailing_newline() {
        let lines = classified("text: >\n  one\n  two\n");
        assert_eq!(lines[1].text, "one two\n");
    }

    #[test]
    fn test_block_continuation_may_contain_markers() {
        let lines = classified("text: |\n  key: value\n   - dash\nnext: 1\n");
        assert_eq!(lines[1].text, "key: value\n - dash\n");
        assert_eq!(lines[2].kind, LineKind::MappingEntry);
        assert_eq!(lines[2].text, "next");
    }

    #[test]
    fn test_quoted_key_is_resolved() {
        let lines = classified("\"a:b\": 1\n");
        assert_eq!(lines[0].text, "a:b");
        assert_eq!(lines[1].text, "1");
    }

    #[test]
    fn test_quoted_value_is_unquoted() {
        let lines = classified("a: \"x # not a comment\"\n");
        assert_eq!(lines[1].text, "x # not a comment");
    }

    #[test]
    fn test_partially_quoted_key_fails() {
        let error = classify_error("\"a\" b: 1\n");
        assert_eq!(error.kind(), ErrorKind::Parsing);
        assert_eq!(error.message(), "key incorrect");
    }

    #[test]
    fn test_unbalanced_key_quote_fails() {
        let error = classify_error("\"a: 1\n");
        assert_eq!(error.message(), "key incorrect");
    }

    #[test]
    fn test_missing_key_fails() {
        let error = classify_error(": 1\n");
        assert_eq!(error.message(), "missing map key");
    }

    #[test]
    fn test_inline_sequence_value_fails() {
        let error = classify_error("a: - 1\n");
        assert_eq!(error.message(), "block sequence not allowed here");
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn test_unterminated_value_quote_fails() {
        let error = classify_error("a: \"open\n");
        assert_eq!(error.message(), "invalid quoting of scalar");
    }

    #[test]
    fn test_document_ending_on_collection_header_fails() {
        let error = classify_error("a: |\n");
        assert_eq!(error.message(), "unexpected document end");

        let error = classify_error("- \n");
        assert_eq!(error.message(), "unexpected document end");
    }
}
