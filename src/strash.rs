//! Structural hashing table.
//!
//! Maps a gate's `(function, children)` key to the node implementing it, so that
//! creating the same gate twice yields the same node.
//!
//! ```text
//! (and, [n1, !n2])  →  n5
//! (xor, [n3, n4])   →  n6
//! (maj, [n1, n2, n3]) → n7
//! ```
//!
//! Children of symmetric gates are sorted before they reach the table, so the key
//! does not depend on the operand order given by the caller.

use std::collections::HashMap;

use crate::node::Children;
use crate::signal::{Node, Signal};
use crate::tt_cache::Literal;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StrashKey {
    pub function: Literal,
    pub children: Children,
}

impl StrashKey {
    pub fn new(function: Literal, children: &[Signal]) -> Self {
        Self {
            function,
            children: children.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StrashTable {
    nodes: HashMap<StrashKey, Node>,
}

impl StrashTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the node implementing `key`.
    pub fn find(&self, key: &StrashKey) -> Option<Node> {
        self.nodes.get(key).copied()
    }

    pub fn insert(&mut self, key: StrashKey, node: Node) {
        self.nodes.insert(key, node);
    }

    /// Remove `key` from the table.
    ///
    /// Returns the node if the key was present.
    pub fn remove(&mut self, key: &StrashKey) -> Option<Node> {
        self.nodes.remove(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StrashKey, Node)> + '_ {
        self.nodes.iter().map(|(key, &node)| (key, node))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
