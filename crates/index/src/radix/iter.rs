//! Ordered traversal of a radix tree.

use super::node::{Leaf, Node};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Remaining siblings of one node's edge list.
struct EdgeCursor<V> {
    parent: Arc<Node<V>>,
    pos: usize,
}

/// Pre-order iterator over the entries below a node.
///
/// Edges are sorted by label, so entries come out in ascending key order.
/// The iterator holds its own references to the nodes it visits and stays
/// valid after the tree or transaction it came from is dropped or written
/// to. It is not restartable: seek before the first call to `next`.
pub struct RadixIterator<V> {
    /// Start node, consumed by the first call to `next`.
    node: Option<Arc<Node<V>>>,
    /// Explicit DFS stack.
    stack: Vec<EdgeCursor<V>>,
}

impl<V> RadixIterator<V> {
    /// Creates an iterator over every entry below `node`.
    pub fn new(node: Arc<Node<V>>) -> Self {
        Self {
            node: Some(node),
            stack: Vec::new(),
        }
    }

    /// Restricts the iterator to entries whose key starts with `prefix`.
    /// A prefix matching nothing leaves the iterator exhausted.
    pub fn seek_prefix(&mut self, prefix: &[u8]) {
        self.stack.clear();
        let Some(mut node) = self.node.take() else {
            return;
        };

        let mut search = prefix;
        loop {
            if search.is_empty() {
                self.node = Some(node);
                return;
            }

            let child = match node.child(search[0]) {
                Some(child) => Arc::clone(child),
                None => return,
            };

            if search.starts_with(&child.prefix) {
                search = &search[child.prefix.len()..];
                node = child;
            } else if child.prefix.starts_with(search) {
                // The child's prefix runs past the search; everything below matches.
                self.node = Some(child);
                return;
            } else {
                return;
            }
        }
    }
}

impl<V> Iterator for RadixIterator<V> {
    type Item = Arc<Leaf<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let elem = match self.node.take() {
                Some(start) => start,
                None => {
                    let top = self.stack.last_mut()?;
                    let elem = Arc::clone(&top.parent.edges[top.pos].node);
                    top.pos += 1;
                    if top.pos == top.parent.edges.len() {
                        self.stack.pop();
                    }
                    elem
                }
            };

            if !elem.edges.is_empty() {
                self.stack.push(EdgeCursor {
                    parent: Arc::clone(&elem),
                    pos: 0,
                });
            }

            if let Some(leaf) = &elem.leaf {
                return Some(Arc::clone(leaf));
            }
        }
    }
}
