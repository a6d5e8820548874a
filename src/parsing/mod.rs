//! Parse entry points.
//!
//! All variants run the same pipeline — line reader, classifier, tree
//! builder — over a complete input and either return the finished document
//! tree or fail with one of the three error kinds. There is no incremental
//! or streaming mode; every buffer the pipeline allocates is released before
//! the call returns, on success and on failure alike.

pub(crate) mod builder;

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::lexing::{classification, reader};
use crate::node::Node;

/// Parse an in-memory string into a document tree.
pub fn parse(source: &str) -> Result<Node> {
    parse_bytes(source.as_bytes())
}

/// Parse an in-memory byte buffer into a document tree.
pub fn parse_bytes(source: &[u8]) -> Result<Node> {
    let mut lines = reader::read_lines(source)?;
    classification::classify_lines(&mut lines)?;
    builder::build_tree(&lines)
}

/// Parse the contents of a file. Fails with an operation error when the
/// file cannot be read.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let data = fs::read(path)
        .map_err(|error| Error::operation(format!("cannot open file {}: {}", path.display(), error)))?;
    parse_bytes(&data)
}

/// Parse from a generic reader. The reader is drained before parsing
/// starts; read failures surface as operation errors.
pub fn parse_reader<R: Read>(mut input: R) -> Result<Node> {
    let mut data = Vec::new();
    input
        .read_to_end(&mut data)
        .map_err(|error| Error::operation(format!("cannot read input: {}", error)))?;
    parse_bytes(&data)
}

/// Parse into a caller-owned root node. The root is always cleared first,
/// so a failed parse leaves it `None` and never a half-built tree.
pub fn parse_into(root: &mut Node, source: &str) -> Result<()> {
    root.clear();
    *root = parse(source)?;
    Ok(())
}
