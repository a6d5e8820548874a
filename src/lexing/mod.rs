//! Line-oriented lexical analysis.
//!
//! Parsing runs as a pipeline over an ordered line buffer: the reader turns
//! raw input into trimmed, position-tagged [`ReaderLine`]s, then the
//! classifier assigns each surviving line exactly one [`LineKind`], splitting
//! composite lines and merging block-scalar continuations in place. The
//! column offset recorded per line is the sole nesting signal consumed by
//! the tree builder.

pub(crate) mod classification;
pub(crate) mod reader;
pub(crate) mod scan;

pub(crate) use reader::{LineKind, ReaderLine};
