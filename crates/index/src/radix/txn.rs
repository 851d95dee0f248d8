//! Copy-on-write transactions over a radix tree.

use super::iter::RadixIterator;
use super::node::{longest_prefix, Edge, Leaf, Node};
use super::tree::RadixTree;
use alloc::sync::Arc;
use core::fmt;

/// A batch of modifications against a [`RadixTree`] snapshot.
///
/// Every write clones the nodes on the path it changes and leaves all other
/// subtrees shared with the source snapshot. Nodes are written through
/// [`Arc::make_mut`]: a node still reachable from a snapshot, a cloned view
/// or a live iterator is cloned, while a node already private to this
/// transaction is updated in place.
///
/// Cloning a transaction yields an independent view of the in-flight state;
/// later writes to either side are invisible to the other.
pub struct RadixTxn<V> {
    root: Arc<Node<V>>,
    size: usize,
}

impl<V> RadixTxn<V> {
    pub(crate) fn new(root: Arc<Node<V>>, size: usize) -> Self {
        Self { root, size }
    }

    /// Returns the current root node.
    #[inline]
    pub fn root(&self) -> &Arc<Node<V>> {
        &self.root
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the transaction holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Looks up a key in the in-flight state.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.root.get(key)
    }

    /// Returns an iterator over the in-flight state.
    pub fn iter(&self) -> RadixIterator<V> {
        RadixIterator::new(Arc::clone(&self.root))
    }

    /// Finalizes the transaction into a new immutable tree.
    pub fn commit(self) -> RadixTree<V> {
        RadixTree::from_parts(self.root, self.size)
    }
}

impl<V: Clone> RadixTxn<V> {
    /// Inserts or updates a key. Returns the previous value if the key
    /// already existed.
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        let leaf = Arc::new(Leaf::new(key, value));
        let old = Self::insert_at(&mut self.root, key, leaf);
        if old.is_none() {
            self.size += 1;
        }
        old.map(|leaf| leaf.value().clone())
    }

    fn insert_at(
        node: &mut Arc<Node<V>>,
        search: &[u8],
        leaf: Arc<Leaf<V>>,
    ) -> Option<Arc<Leaf<V>>> {
        // The key ends here: replace the leaf.
        if search.is_empty() {
            return Arc::make_mut(node).leaf.replace(leaf);
        }

        let label = search[0];
        let Some(idx) = node.edge_position(label) else {
            // No edge: hang a fresh leaf node carrying the remaining key.
            Arc::make_mut(node).add_edge(Edge {
                label,
                node: Arc::new(Node::with_leaf(search, leaf)),
            });
            return None;
        };

        let common = longest_prefix(search, &node.edges[idx].node.prefix);
        let nc = Arc::make_mut(node);
        if common == nc.edges[idx].node.prefix.len() {
            return Self::insert_at(&mut nc.edges[idx].node, &search[common..], leaf);
        }

        // Partial match: split the edge at the common prefix.
        let mut split = Node::empty();
        split.prefix = search[..common].to_vec();

        let mut moved = Node::clone(&nc.edges[idx].node);
        moved.prefix = moved.prefix[common..].to_vec();
        split.add_edge(Edge {
            label: moved.prefix[0],
            node: Arc::new(moved),
        });

        let rest = &search[common..];
        if rest.is_empty() {
            split.leaf = Some(leaf);
        } else {
            split.add_edge(Edge {
                label: rest[0],
                node: Arc::new(Node::with_leaf(rest, leaf)),
            });
        }

        nc.edges[idx].node = Arc::new(split);
        None
    }

    /// Deletes a key. Returns the removed value, or `None` if the key was
    /// absent, in which case nothing is cloned.
    pub fn delete(&mut self, key: &[u8]) -> Option<V> {
        self.root.get(key)?;
        let leaf = Self::delete_at(&mut self.root, true, key)?;
        self.size -= 1;
        Some(leaf.value().clone())
    }

    fn delete_at(node: &mut Arc<Node<V>>, is_root: bool, search: &[u8]) -> Option<Arc<Leaf<V>>> {
        if search.is_empty() {
            let nc = Arc::make_mut(node);
            let leaf = nc.leaf.take()?;
            if !is_root && nc.edges.len() == 1 {
                nc.merge_child();
            }
            return Some(leaf);
        }

        let idx = node.edge_position(search[0])?;
        let consumed = node.edges[idx].node.prefix.len();
        if !search.starts_with(&node.edges[idx].node.prefix) {
            return None;
        }

        let nc = Arc::make_mut(node);
        let leaf = Self::delete_at(&mut nc.edges[idx].node, false, &search[consumed..])?;

        let child = &nc.edges[idx].node;
        if child.leaf.is_none() && child.edges.is_empty() {
            nc.edges.remove(idx);
            if !is_root && nc.edges.len() == 1 && nc.leaf.is_none() {
                nc.merge_child();
            }
        }
        Some(leaf)
    }
}

impl<V> Clone for RadixTxn<V> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<V> fmt::Debug for RadixTxn<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixTxn").field("len", &self.size).finish()
    }
}
