//! Arbor Index - Persistent radix tree and indexers for the Arbor store.
//!
//! This crate provides:
//!
//! - `RadixTree`: Immutable radix tree snapshots with structural sharing
//! - `RadixTxn`: Copy-on-write transactions producing new snapshots
//! - `RadixIterator`: Ordered, prefix-seekable traversal
//! - `KeyEncoder`: Order-preserving encoding of typed values into key bytes
//! - `FieldIndex` / `MultiFieldIndex` / `CompoundIndex`: Indexers over row fields
//!
//! # Example
//!
//! ```rust
//! use arbor_index::RadixTree;
//!
//! let tree: RadixTree<u32> = RadixTree::new();
//! let mut txn = tree.txn();
//! txn.insert(b"apple", 1);
//! txn.insert(b"apricot", 2);
//! txn.insert(b"banana", 3);
//! let next = txn.commit();
//!
//! // The earlier snapshot is untouched.
//! assert!(tree.is_empty());
//! assert_eq!(next.get(b"apricot"), Some(&2));
//!
//! // Prefix scan in key order.
//! let values: Vec<u32> = next.iter_prefix(b"ap").map(|leaf| *leaf.value()).collect();
//! assert_eq!(values, vec![1, 2]);
//! ```

#![no_std]

extern crate alloc;

pub mod compound;
pub mod field;
pub mod key;
pub mod radix;

pub use compound::CompoundIndex;
pub use field::{FieldIndex, MultiFieldIndex};
pub use key::KeyEncoder;
pub use radix::{Leaf, Node, RadixIterator, RadixTree, RadixTxn};
