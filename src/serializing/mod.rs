//! Serialization entry points and configuration.

pub(crate) mod serializer;

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::Node;

/// Formatting knobs for the serializer.
///
/// Deserializable so that embedding applications can load it from their own
/// configuration layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeConfig {
    /// Spaces per nesting level for map children. Must be at least 2.
    pub indent_width: usize,
    /// Soft wrap width for long scalars; 0 disables folding.
    pub max_scalar_line_length: usize,
    /// A map nested directly under a sequence entry starts on its own line.
    pub sequence_map_new_line: bool,
    /// A scalar value under a map key starts on its own line.
    pub map_scalar_new_line: bool,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_scalar_line_length: 64,
            sequence_map_new_line: false,
            map_scalar_new_line: false,
        }
    }
}

impl SerializeConfig {
    fn validate(&self) -> Result<()> {
        if self.indent_width < 2 {
            return Err(Error::operation("indentation width must be at least 2"));
        }
        Ok(())
    }
}

/// Serialize a document tree to formatted text.
pub fn serialize(root: &Node, config: &SerializeConfig) -> Result<String> {
    config.validate()?;
    Ok(serializer::Serializer::new(config).serialize(root))
}

/// Serialize a document tree into a generic writer.
pub fn serialize_to_writer<W: Write>(root: &Node, mut writer: W, config: &SerializeConfig) -> Result<()> {
    let text = serialize(root, config)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|error| Error::operation(format!("cannot write output: {}", error)))
}

/// Serialize a document tree into a file. Fails with an operation error
/// when the file cannot be created.
pub fn serialize_file(root: &Node, path: impl AsRef<Path>, config: &SerializeConfig) -> Result<()> {
    let path = path.as_ref();
    let text = serialize(root, config)?;
    fs::write(path, text)
        .map_err(|error| Error::operation(format!("cannot open file {}: {}", path.display(), error)))
}
