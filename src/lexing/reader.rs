//! The lexical line reader.
//!
//! Turns a raw byte stream into an ordered buffer of trimmed,
//! position-tagged lines. Comments are stripped outside quoted spans, `---`
//! discards any buffered preamble, `...` stops reading, and every surviving
//! character must be a horizontal tab or printable ASCII. A second pass
//! rejects tabs in the indentation, drops whitespace-only lines and records
//! the column offset of the first content character. That offset is the sole
//! nesting-depth signal used by later stages.

use crate::error::{Error, Result};

/// Classification assigned to a logical line by the classifier; `Unset`
/// until that pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Unset,
    SequenceEntry,
    MappingEntry,
    Scalar,
}

/// One buffered line of input, alive only for the duration of a parse call.
#[derive(Debug, Clone)]
pub(crate) struct ReaderLine {
    /// Trimmed line content. For mapping entries this becomes the resolved
    /// key text; for the dash line of a split sequence entry it is `"-"`.
    pub text: String,
    /// 1-based source line number.
    pub no: usize,
    /// Column offset of the first content character.
    pub offset: usize,
    pub kind: LineKind,
    /// Pending literal block scalar (`|`); continuations join with `\n`.
    pub literal_block: bool,
    /// Pending folded block scalar (`>`); continuations join with a space.
    pub folded_block: bool,
    /// The finished scalar keeps one trailing newline.
    pub ends_with_newline: bool,
}

impl ReaderLine {
    pub(crate) fn new(text: String, no: usize, offset: usize) -> Self {
        Self {
            text,
            no,
            offset,
            kind: LineKind::Unset,
            literal_block: false,
            folded_block: false,
            ends_with_newline: false,
        }
    }

    pub(crate) fn has_block_flags(&self) -> bool {
        self.literal_block || self.folded_block
    }
}

/// Read the entire input into a buffer of trimmed, offset-tagged lines.
pub(crate) fn read_lines(input: &[u8]) -> Result<Vec<ReaderLine>> {
    let mut lines = collect_raw_lines(input)?;
    trim_and_tag_offsets(&mut lines)?;
    Ok(lines)
}

fn collect_raw_lines(input: &[u8]) -> Result<Vec<ReaderLine>> {
    let mut lines: Vec<ReaderLine> = Vec::new();
    let mut document_start_found = false;

    for (index, raw) in input.split(|&b| b == b'\n').enumerate() {
        let no = index + 1;
        let mut line = strip_comment(raw);

        // Document start: discard any preamble buffered so far.
        if !document_start_found && line == b"---" {
            lines.clear();
            document_start_found = true;
            continue;
        }

        // Document end: the rest of the stream is ignored.
        if line == b"..." {
            break;
        }

        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        if line.is_empty() {
            continue;
        }

        for (column, &byte) in line.iter().enumerate() {
            if byte != b'\t' && !(32..=125).contains(&byte) {
                return Err(Error::parsing_at("invalid character", no, column + 1));
            }
        }

        // Validated content is plain ASCII, so this conversion is lossless.
        lines.push(ReaderLine::new(
            String::from_utf8_lossy(line).into_owned(),
            no,
            0,
        ));
    }

    Ok(lines)
}

fn trim_and_tag_offsets(lines: &mut Vec<ReaderLine>) -> Result<()> {
    let mut index = 0;
    while index < lines.len() {
        let start = match lines[index].text.find(|c| c != ' ' && c != '\t') {
            Some(start) => start,
            None => {
                // Whitespace only, drop it.
                lines.remove(index);
                continue;
            }
        };
        let line = &mut lines[index];

        if let Some(tab) = line.text.find('\t') {
            if tab < start {
                return Err(Error::parsing_at("tab in indentation", line.no, tab + 1));
            }
        }

        let end = line
            .text
            .rfind(|c| c != ' ' && c != '\t')
            .unwrap_or(line.text.len() - 1);
        line.text = line.text[start..=end].to_string();
        line.offset = start;
        index += 1;
    }
    Ok(())
}

/// Truncate at the first `#` outside every double-quoted span.
fn strip_comment(raw: &[u8]) -> &[u8] {
    let mut in_quote = false;
    let mut prev = 0u8;
    for (index, &byte) in raw.iter().enumerate() {
        if byte == b'"' && prev != b'\\' {
            in_quote = !in_quote;
        } else if byte == b'#' && !in_quote {
            return &raw[..index];
        }
        prev = byte;
    }
    raw
}
