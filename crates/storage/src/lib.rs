//! Arbor Storage - Transactional multi-index store.
//!
//! This crate provides:
//!
//! - `Store`: Holds the schema and the current root of the index space
//! - `Transaction`: Snapshot-isolated reads and staged writes, published on commit
//! - `ResultIterator`: Ordered rows matching a lookup
//!
//! Every index of every table lives in its own persistent radix tree. A
//! transaction copies the root, writes through copy-on-write views of the
//! trees it touches, and publishes the new root atomically on commit.
//!
//! # Example
//!
//! ```rust
//! use arbor_core::schema::{DbSchema, IndexSchema, TableSchema};
//! use arbor_core::{DataType, Value};
//! use arbor_index::FieldIndex;
//! use arbor_storage::Store;
//!
//! struct User {
//!     id: String,
//!     age: i64,
//! }
//!
//! let schema = DbSchema::new().table(
//!     TableSchema::builder("user")
//!         .index(IndexSchema::single(
//!             "id",
//!             FieldIndex::new("id", DataType::String, |u: &User| {
//!                 Some(Value::from(u.id.as_str()))
//!             }),
//!         ))
//!         .index(IndexSchema::single(
//!             "age",
//!             FieldIndex::new("age", DataType::Int64, |u: &User| Some(Value::from(u.age))),
//!         ))
//!         .build(),
//! );
//! let store = Store::init(schema).unwrap();
//!
//! let mut txn = store.txn();
//! txn.insert("user", User { id: "1".into(), age: 30 }).unwrap();
//! txn.insert("user", User { id: "2".into(), age: 30 }).unwrap();
//! txn.commit();
//!
//! let txn = store.txn();
//! let ids: Vec<String> = txn
//!     .get("user", "age", &[Value::Int64(30)])
//!     .unwrap()
//!     .map(|u| u.id.clone())
//!     .collect();
//! assert_eq!(ids, ["1", "2"]);
//! ```

extern crate alloc;

pub mod iter;
pub mod space;
pub mod store;
pub mod transaction;

pub use iter::ResultIterator;
pub use space::{entry_key, index_path, IndexTree, MetaTree};
pub use store::Store;
pub use transaction::Transaction;
