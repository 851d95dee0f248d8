//! Published radix tree snapshots.

use super::iter::RadixIterator;
use super::node::Node;
use super::txn::RadixTxn;
use alloc::sync::Arc;
use core::fmt;

/// An immutable radix tree.
///
/// A tree is a snapshot: it never changes after construction and can be
/// shared freely between threads. Writes go through a [`RadixTxn`], which
/// produces a new tree on commit and shares every untouched subtree with
/// the tree it started from. The main advantage over a hash map is ordered
/// iteration and prefix scans.
pub struct RadixTree<V> {
    root: Arc<Node<V>>,
    size: usize,
}

impl<V> RadixTree<V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
        }
    }

    pub(crate) fn from_parts(root: Arc<Node<V>>, size: usize) -> Self {
        Self { root, size }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, for richer traversals.
    #[inline]
    pub fn root(&self) -> &Arc<Node<V>> {
        &self.root
    }

    /// Looks up a key.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.root.get(key)
    }

    /// Starts a transaction on top of this snapshot.
    pub fn txn(&self) -> RadixTxn<V> {
        RadixTxn::new(Arc::clone(&self.root), self.size)
    }

    /// Returns an iterator over all entries in ascending key order.
    pub fn iter(&self) -> RadixIterator<V> {
        RadixIterator::new(Arc::clone(&self.root))
    }

    /// Returns an iterator over the entries whose key starts with `prefix`.
    pub fn iter_prefix(&self, prefix: &[u8]) -> RadixIterator<V> {
        let mut iter = self.iter();
        iter.seek_prefix(prefix);
        iter
    }
}

impl<V: Clone> RadixTree<V> {
    /// Inserts a key, returning the new tree and the previous value.
    pub fn insert(&self, key: &[u8], value: V) -> (Self, Option<V>) {
        let mut txn = self.txn();
        let old = txn.insert(key, value);
        (txn.commit(), old)
    }

    /// Deletes a key, returning the new tree and the removed value.
    pub fn delete(&self, key: &[u8]) -> (Self, Option<V>) {
        let mut txn = self.txn();
        let old = txn.delete(key);
        (txn.commit(), old)
    }
}

impl<V> Clone for RadixTree<V> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
        }
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixTree").field("len", &self.size).finish()
    }
}
