//! Depth-first emitter for document trees.
//!
//! `None` children are never emitted. Sequence children are prefixed with
//! `- ` and nest at two extra columns (the width of the prefix); map
//! children nest at `indent_width` extra columns. Scalars are emitted
//! inline, as a literal block (`|`) when they span lines, or as a folded
//! block (`>`) when a single line exceeds the configured wrap width; a `-`
//! is appended to the block indicator when the scalar does not end with a
//! newline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Node;
use crate::serializing::SerializeConfig;

/// Keys containing any of these must be quoted (and `\`/`"` escaped) so the
/// classifier reads them back as a single key token.
static RESERVED_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[":{}\[\],&*#?|\-<>=!%@]"#).expect("reserved character class"));

pub(crate) struct Serializer<'a> {
    config: &'a SerializeConfig,
    out: String,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(config: &'a SerializeConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    pub(crate) fn serialize(mut self, root: &Node) -> String {
        self.node(root, 0);
        self.out
    }

    fn node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::None => {}
            Node::Scalar(text) => self.scalar(text, indent, false),
            Node::Sequence(_) => self.sequence(node, indent),
            Node::Map(_) => self.map(node, indent, false),
        }
    }

    fn sequence(&mut self, node: &Node, indent: usize) {
        for (_, child) in node.iter().filter(|(_, child)| !child.is_none()) {
            self.pad(indent);
            match child {
                Node::Sequence(_) => {
                    self.out.push_str("-\n");
                    self.sequence(child, indent + 2);
                }
                Node::Map(_) if self.config.sequence_map_new_line => {
                    self.out.push_str("-\n");
                    self.map(child, indent + 2, false);
                }
                Node::Map(_) => {
                    self.out.push_str("- ");
                    self.map(child, indent + 2, true);
                }
                _ => {
                    self.out.push_str("- ");
                    self.scalar(child.as_str(), indent + 2, true);
                }
            }
        }
    }

    fn map(&mut self, node: &Node, indent: usize, inline_first: bool) {
        let mut first = true;
        for (key, child) in node.iter().filter(|(_, child)| !child.is_none()) {
            if !(inline_first && first) {
                self.pad(indent);
            }
            first = false;
            self.out.push_str(&escape_key(key.unwrap_or("")));
            self.out.push(':');

            let child_indent = indent + self.config.indent_width;
            match child {
                Node::Scalar(text) => {
                    if self.config.map_scalar_new_line && is_inline_form(text, self.config) {
                        self.out.push('\n');
                        self.scalar(text, child_indent, false);
                    } else {
                        self.out.push(' ');
                        self.scalar(text, child_indent, true);
                    }
                }
                Node::Sequence(_) => {
                    self.out.push('\n');
                    self.sequence(child, child_indent);
                }
                _ => {
                    self.out.push('\n');
                    self.map(child, child_indent, false);
                }
            }
        }
    }

    /// Emit one scalar. `inline` means the value (or block indicator)
    /// continues the current output line.
    fn scalar(&mut self, text: &str, indent: usize, inline: bool) {
        let mut segments: Vec<&str> = text.split('\n').collect();
        let ends_with_newline = segments.len() > 1 && segments.last() == Some(&"");
        if ends_with_newline {
            segments.pop();
        }

        if segments.len() > 1 {
            self.block(&segments, '|', ends_with_newline, indent, inline);
            return;
        }

        let line = segments.first().copied().unwrap_or("");
        let max = self.config.max_scalar_line_length;
        if max > 0 && line.len() > max {
            let wrapped = wrap(line, max);
            if wrapped.len() > 1 {
                self.block(&wrapped, '>', ends_with_newline, indent, inline);
                return;
            }
        }

        if !inline {
            self.pad(indent);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn block(
        &mut self,
        segments: &[&str],
        indicator: char,
        ends_with_newline: bool,
        indent: usize,
        inline: bool,
    ) {
        if !inline {
            self.pad(indent);
        }
        self.out.push(indicator);
        if !ends_with_newline {
            self.out.push('-');
        }
        self.out.push('\n');
        for segment in segments {
            self.pad(indent);
            self.out.push_str(segment);
            self.out.push('\n');
        }
    }

    fn pad(&mut self, width: usize) {
        self.out.push_str(&" ".repeat(width));
    }
}

/// True when the scalar renders as a single inline line under `config`.
fn is_inline_form(text: &str, config: &SerializeConfig) -> bool {
    let mut segments: Vec<&str> = text.split('\n').collect();
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }
    if segments.len() > 1 {
        return false;
    }
    let line = segments.first().copied().unwrap_or("");
    let max = config.max_scalar_line_length;
    max == 0 || line.len() <= max || wrap(line, max).len() == 1
}

/// Greedy word wrap: advance `max` characters, split at the nearest
/// following space, repeat.
fn wrap(line: &str, max: usize) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = line;
    loop {
        let limit = match rest.char_indices().nth(max) {
            Some((byte, _)) => byte,
            None => {
                segments.push(rest);
                break;
            }
        };
        match rest[limit..].find(' ') {
            Some(found) => {
                let split = limit + found;
                segments.push(&rest[..split]);
                rest = &rest[split + 1..];
            }
            None => {
                segments.push(rest);
                break;
            }
        }
    }
    segments
}

/// Quote and escape a key when it contains reserved characters.
fn escape_key(key: &str) -> String {
    if !RESERVED_KEY_CHARS.is_match(key) {
        return key.to_string();
    }
    let mut escaped = String::with_capacity(key.len() + 2);
    escaped.push('"');
    for c in key.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('"');
    escaped
}
