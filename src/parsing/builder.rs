//! Recursive-descent tree builder.
//!
//! Consumes the classified line list with a single forward cursor. The
//! column offset is the only nesting signal: an equal offset means a
//! sibling, a greater offset is malformed input, and a smaller offset ends
//! the current collection. Siblings at one offset must all be the same kind
//! of entry; a violation means the classifier let something through and is
//! surfaced as an internal error.

use crate::error::{Error, Result};
use crate::lexing::{LineKind, ReaderLine};
use crate::node::Node;

/// Build the document tree from the classified line list.
pub(crate) fn build_tree(lines: &[ReaderLine]) -> Result<Node> {
    if lines.is_empty() {
        return Ok(Node::None);
    }
    let mut root = Node::None;
    let mut cursor = 0;
    parse_node(lines, &mut cursor, &mut root)?;
    if cursor != lines.len() {
        return Err(Error::internal("unexpected document end"));
    }
    Ok(root)
}

fn parse_node(lines: &[ReaderLine], cursor: &mut usize, node: &mut Node) -> Result<()> {
    let line = lines
        .get(*cursor)
        .ok_or_else(|| Error::internal("unexpected document end"))?;
    match line.kind {
        LineKind::Scalar => {
            node.set(line.text.clone());
            *cursor += 1;
            Ok(())
        }
        LineKind::SequenceEntry => parse_sequence(lines, cursor, node),
        LineKind::MappingEntry => parse_map(lines, cursor, node),
        LineKind::Unset => Err(Error::internal(format!(
            "unclassified line {} reached the builder",
            line.no
        ))),
    }
}

fn parse_sequence(lines: &[ReaderLine], cursor: &mut usize, node: &mut Node) -> Result<()> {
    *node = Node::Sequence(Vec::new());
    let offset = lines[*cursor].offset;
    loop {
        // Step past the dash line; the entry's content follows it.
        *cursor += 1;
        parse_node(lines, cursor, node.push_back())?;

        let next = match lines.get(*cursor) {
            None => break,
            Some(next) => next,
        };
        if next.offset < offset {
            break;
        }
        if next.offset > offset {
            return Err(Error::parsing("incorrect offset", next.no));
        }
        if next.kind != LineKind::SequenceEntry {
            return Err(Error::internal(format!(
                "different entry not allowed at line {}",
                next.no
            )));
        }
    }
    Ok(())
}

fn parse_map(lines: &[ReaderLine], cursor: &mut usize, node: &mut Node) -> Result<()> {
    *node = Node::Map(Default::default());
    let offset = lines[*cursor].offset;
    loop {
        let key = lines[*cursor].text.clone();
        *cursor += 1;
        parse_node(lines, cursor, node.entry(&key))?;

        let next = match lines.get(*cursor) {
            None => break,
            Some(next) => next,
        };
        if next.offset < offset {
            break;
        }
        if next.offset > offset {
            return Err(Error::parsing("incorrect offset", next.no));
        }
        if next.kind != LineKind::MappingEntry {
            return Err(Error::internal(format!(
                "different entry not allowed at line {}",
                next.no
            )));
        }
    }
    Ok(())
}
