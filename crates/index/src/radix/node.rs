//! Radix tree node definitions.

use alloc::sync::Arc;
use alloc::vec::Vec;

/// A stored key and its value.
#[derive(Debug)]
pub struct Leaf<V> {
    key: Vec<u8>,
    value: V,
}

impl<V> Leaf<V> {
    pub(crate) fn new(key: &[u8], value: V) -> Self {
        Self {
            key: key.to_vec(),
            value,
        }
    }

    /// Returns the full key of this entry.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the value of this entry.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// An edge to a child node, labelled by the first byte of the child prefix.
pub(crate) struct Edge<V> {
    pub(crate) label: u8,
    pub(crate) node: Arc<Node<V>>,
}

impl<V> Clone for Edge<V> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            node: Arc::clone(&self.node),
        }
    }
}

/// An immutable node in the radix tree.
///
/// Once a node is reachable from a published tree it is never modified.
/// Cloning is shallow: the prefix and the edge list are copied, children
/// and the leaf are shared by reference.
pub struct Node<V> {
    /// Entry terminating at this node.
    pub(crate) leaf: Option<Arc<Leaf<V>>>,
    /// Bytes consumed on the way from the parent.
    pub(crate) prefix: Vec<u8>,
    /// Child edges, sorted by label with unique labels.
    pub(crate) edges: Vec<Edge<V>>,
}

impl<V> Clone for Node<V> {
    fn clone(&self) -> Self {
        Self {
            leaf: self.leaf.clone(),
            prefix: self.prefix.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl<V> Node<V> {
    /// Creates an empty node.
    pub(crate) fn empty() -> Self {
        Self {
            leaf: None,
            prefix: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Creates a node holding only a leaf.
    pub(crate) fn with_leaf(prefix: &[u8], leaf: Arc<Leaf<V>>) -> Self {
        Self {
            leaf: Some(leaf),
            prefix: prefix.to_vec(),
            edges: Vec::new(),
        }
    }

    /// Returns true if an entry terminates at this node.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Returns the entry terminating at this node.
    #[inline]
    pub fn leaf(&self) -> Option<&Leaf<V>> {
        self.leaf.as_deref()
    }

    /// Returns the compressed prefix of this node.
    #[inline]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the number of child edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Binary search for an edge label.
    #[inline]
    fn search_edge(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |e| e.label)
    }

    /// Returns the position of the edge with the given label.
    #[inline]
    pub(crate) fn edge_position(&self, label: u8) -> Option<usize> {
        self.search_edge(label).ok()
    }

    /// Returns the child reached through the given label.
    #[inline]
    pub(crate) fn child(&self, label: u8) -> Option<&Arc<Node<V>>> {
        self.edge_position(label).map(|idx| &self.edges[idx].node)
    }

    /// Inserts an edge keeping the edge list sorted.
    pub(crate) fn add_edge(&mut self, edge: Edge<V>) {
        match self.search_edge(edge.label) {
            Ok(idx) => self.edges[idx] = edge,
            Err(idx) => self.edges.insert(idx, edge),
        }
    }

    /// Absorbs the only child into this node, concatenating prefixes.
    pub(crate) fn merge_child(&mut self) {
        debug_assert_eq!(self.edges.len(), 1);
        let child = Arc::clone(&self.edges[0].node);
        self.prefix.extend_from_slice(&child.prefix);
        self.leaf = child.leaf.clone();
        self.edges = child.edges.clone();
    }

    /// Looks up a key below this node.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let mut node = self;
        let mut search = key;
        loop {
            if search.is_empty() {
                return node.leaf.as_ref().map(|leaf| &leaf.value);
            }

            let child = node.child(search[0])?;
            if !search.starts_with(&child.prefix) {
                return None;
            }
            search = &search[child.prefix.len()..];
            node = child;
        }
    }
}

/// Returns the length of the longest common prefix of two byte strings.
#[inline]
pub(crate) fn longest_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
