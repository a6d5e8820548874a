//! # yamlet
//!
//! A parser and serializer for a constrained subset of YAML, meant to be
//! embedded as a configuration and data-interchange layer.
//!
//! Parsing runs a single pipeline: the lexical line reader produces an
//! ordered buffer of trimmed, position-tagged lines; the classifier assigns
//! each logical line a kind and splits or merges composite lines in place;
//! the tree builder consumes the classified buffer with one forward cursor,
//! using the column offset as the sole nesting signal. The result is a
//! [`Node`] tree that the serializer can turn back into formatted text.
//!
//! The subset is deliberate: no anchors or aliases, no merge keys, no type
//! tags, no flow-style collections, no multi-document streams and no
//! non-scalar map keys. `---` and `...` are recognized purely as document
//! start/end markers.
//!
//! ```text
//! let root = yamlet::parse("a: 1\nb:\n  - x\n  - y\n")?;
//! assert_eq!(root.get_key("a").unwrap().as_str(), "1");
//!
//! let text = yamlet::serialize(&root, &yamlet::SerializeConfig::default())?;
//! ```

mod lexing;

pub mod error;
pub mod node;
pub mod parsing;
pub mod serializing;

pub use error::{Error, ErrorKind, Result};
pub use node::{Node, NodeIter, NodeIterMut};
pub use parsing::{parse, parse_bytes, parse_file, parse_into, parse_reader};
pub use serializing::{serialize, serialize_file, serialize_to_writer, SerializeConfig};
