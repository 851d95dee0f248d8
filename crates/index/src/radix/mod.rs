//! Persistent radix tree for the Arbor store.
//!
//! This module provides an immutable, prefix-compressed trie with
//! copy-on-write transactions and ordered prefix iteration.

mod iter;
mod node;
mod tree;
mod txn;

pub use iter::RadixIterator;
pub use node::{Leaf, Node};
pub use tree::RadixTree;
pub use txn::RadixTxn;
