//! The document model.
//!
//! A parsed document is a tree of [`Node`] values. Every node is exactly one
//! of: `None` (empty), `Scalar` (opaque text), `Sequence` (children addressed
//! by dense index) or `Map` (children addressed by unique text keys). A node
//! exclusively owns its children; there is no sharing and there are no
//! cycles.
//!
//! Two contracts are load-bearing for the rest of the pipeline:
//!
//! - Map iteration always yields keys in ascending lexicographic order,
//!   independent of insertion order.
//! - Mutable positional or keyed access *coerces* the node into the matching
//!   container type, discarding any prior content. This is an intentional,
//!   documented side effect of [`Node::at`], [`Node::entry`] and the push
//!   operations, not an error.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A value in the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// The default, empty state.
    #[default]
    None,
    /// An opaque text payload.
    Scalar(String),
    /// An ordered collection of children; iteration order equals index order.
    Sequence(Vec<Node>),
    /// A keyed collection of children; iteration order is ascending
    /// lexicographic key order.
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// True if this node is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Node::None)
    }

    /// True if this node holds scalar text.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    /// True if this node is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    /// True if this node is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// Number of children; 0 for `None` and `Scalar` nodes.
    pub fn size(&self) -> usize {
        match self {
            Node::None | Node::Scalar(_) => 0,
            Node::Sequence(children) => children.len(),
            Node::Map(children) => children.len(),
        }
    }

    /// Reset this node to `None`, recursively destroying all children.
    pub fn clear(&mut self) {
        *self = Node::None;
    }

    /// The scalar text, or `""` for non-scalar nodes. Never fails.
    pub fn as_str(&self) -> &str {
        match self {
            Node::Scalar(text) => text,
            _ => "",
        }
    }

    /// Parse the scalar text into `T`. Returns `None` for non-scalar nodes
    /// and unparseable text.
    pub fn as_value<T: FromStr>(&self) -> Option<T> {
        match self {
            Node::Scalar(text) => T::from_str(text).ok(),
            _ => None,
        }
    }

    /// Parse the scalar text into `T`, falling back to `default`.
    pub fn as_value_or<T: FromStr>(&self, default: T) -> T {
        self.as_value().unwrap_or(default)
    }

    /// Assign scalar text, coercing this node to `Scalar` and overwriting
    /// any prior content.
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Node::Scalar(value.into());
    }

    /// Read-only positional access. Returns `None` unless this node is a
    /// sequence and `index` is in range. Does not coerce.
    pub fn get(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence(children) => children.get(index),
            _ => None,
        }
    }

    /// Read-only keyed access. Returns `None` unless this node is a map
    /// containing `key`. Does not coerce.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(children) => children.get(key),
            _ => None,
        }
    }

    /// Mutable positional access. Coerces this node into a sequence
    /// (discarding non-sequence content), then returns the child at `index`,
    /// or `None` when the position does not exist.
    pub fn at(&mut self, index: usize) -> Option<&mut Node> {
        self.sequence_children().get_mut(index)
    }

    /// Mutable keyed access. Coerces this node into a map (discarding
    /// non-map content) and inserts an empty child under `key` if absent.
    pub fn entry(&mut self, key: &str) -> &mut Node {
        if !self.is_map() {
            *self = Node::Map(BTreeMap::new());
        }
        match self {
            Node::Map(children) => children.entry(key.to_string()).or_default(),
            _ => unreachable!("entry() coerced self to a map"),
        }
    }

    /// Append an empty child at the end of the sequence, coercing first.
    pub fn push_back(&mut self) -> &mut Node {
        let children = self.sequence_children();
        children.push(Node::None);
        children.last_mut().expect("push_back appended an element")
    }

    /// Insert an empty child at position 0, shifting every existing index up
    /// by one. Coerces first.
    pub fn push_front(&mut self) -> &mut Node {
        self.insert(0)
    }

    /// Insert an empty child at `index`, shifting every element whose index
    /// is >= `index` up by one. An index beyond the end appends. Coerces
    /// first.
    pub fn insert(&mut self, index: usize) -> &mut Node {
        let children = self.sequence_children();
        let index = index.min(children.len());
        children.insert(index, Node::None);
        &mut children[index]
    }

    /// Remove and recursively destroy the child at `index`. A no-op when the
    /// position does not exist or this node is not a sequence.
    pub fn erase(&mut self, index: usize) {
        if let Node::Sequence(children) = self {
            if index < children.len() {
                children.remove(index);
            }
        }
    }

    /// Remove and recursively destroy the child under `key`. A no-op when
    /// the key does not exist or this node is not a map.
    pub fn erase_key(&mut self, key: &str) {
        if let Node::Map(children) = self {
            children.remove(key);
        }
    }

    /// Cursor over the children of this node. Sequence children yield
    /// `(None, node)` in index order; map children yield `(Some(key), node)`
    /// in ascending key order. Empty for `None` and `Scalar` nodes.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter {
            inner: match self {
                Node::Sequence(children) => IterInner::Sequence(children.iter()),
                Node::Map(children) => IterInner::Map(children.iter()),
                _ => IterInner::Empty,
            },
        }
    }

    /// Mutable variant of [`Node::iter`].
    pub fn iter_mut(&mut self) -> NodeIterMut<'_> {
        NodeIterMut {
            inner: match self {
                Node::Sequence(children) => IterMutInner::Sequence(children.iter_mut()),
                Node::Map(children) => IterMutInner::Map(children.iter_mut()),
                _ => IterMutInner::Empty,
            },
        }
    }

    /// Coerce into a sequence, discarding non-sequence content, and expose
    /// the backing store.
    fn sequence_children(&mut self) -> &mut Vec<Node> {
        if !self.is_sequence() {
            *self = Node::Sequence(Vec::new());
        }
        match self {
            Node::Sequence(children) => children,
            _ => unreachable!("sequence_children() coerced self to a sequence"),
        }
    }

    /// Move this node's direct children into `out`, leaving the containers
    /// empty.
    fn take_children_into(&mut self, out: &mut Vec<Node>) {
        match self {
            Node::Sequence(children) => out.append(children),
            Node::Map(children) => out.extend(mem::take(children).into_values()),
            _ => {}
        }
    }
}

/// Teardown is iterative so that deeply nested documents cannot exhaust the
/// stack through recursive drops.
impl Drop for Node {
    fn drop(&mut self) {
        if self.size() == 0 {
            return;
        }
        let mut stack: Vec<Node> = Vec::new();
        self.take_children_into(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.take_children_into(&mut stack);
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

enum IterInner<'a> {
    Empty,
    Sequence(std::slice::Iter<'a, Node>),
    Map(btree_map::Iter<'a, String, Node>),
}

/// Read-only cursor over the children of a node, polymorphic over the two
/// backing stores. Items are `(key, node)` pairs where the key is `None` for
/// sequence children.
pub struct NodeIter<'a> {
    inner: IterInner<'a>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (Option<&'a str>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Empty => None,
            IterInner::Sequence(iter) => iter.next().map(|node| (None, node)),
            IterInner::Map(iter) => iter.next().map(|(key, node)| (Some(key.as_str()), node)),
        }
    }
}

impl DoubleEndedIterator for NodeIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Empty => None,
            IterInner::Sequence(iter) => iter.next_back().map(|node| (None, node)),
            IterInner::Map(iter) => iter
                .next_back()
                .map(|(key, node)| (Some(key.as_str()), node)),
        }
    }
}

enum IterMutInner<'a> {
    Empty,
    Sequence(std::slice::IterMut<'a, Node>),
    Map(btree_map::IterMut<'a, String, Node>),
}

/// Mutable cursor over the children of a node.
pub struct NodeIterMut<'a> {
    inner: IterMutInner<'a>,
}

impl<'a> Iterator for NodeIterMut<'a> {
    type Item = (Option<&'a str>, &'a mut Node);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterMutInner::Empty => None,
            IterMutInner::Sequence(iter) => iter.next().map(|node| (None, node)),
            IterMutInner::Map(iter) => iter.next().map(|(key, node)| (Some(key.as_str()), node)),
        }
    }
}

impl DoubleEndedIterator for NodeIterMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterMutInner::Empty => None,
            IterMutInner::Sequence(iter) => iter.next_back().map(|node| (None, node)),
            IterMutInner::Map(iter) => iter
                .next_back()
                .map(|(key, node)| (Some(key.as_str()), node)),
        }
    }
}
