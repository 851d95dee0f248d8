//! Arbor Core - Core types and schema definitions for the Arbor store.
//!
//! This crate provides the foundational types shared by the index and
//! storage layers:
//!
//! - `DataType`: Types an index key can be built from
//! - `Value`: Field values and query arguments
//! - `schema`: Schema definitions (database, table, index) and the indexer traits
//! - `Error`: Error types for store operations
//!
//! # Example
//!
//! ```rust
//! use arbor_core::schema::{DbSchema, IndexSchema, Indexer, SingleIndexer, TableSchema};
//! use arbor_core::{IndexError, Value};
//!
//! struct Id;
//!
//! impl Indexer for Id {
//!     fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
//!         match args {
//!             [Value::String(s)] => Ok(s.as_bytes().to_vec()),
//!             _ => Err(IndexError::arity(1, args.len())),
//!         }
//!     }
//! }
//!
//! impl SingleIndexer<String> for Id {
//!     fn from_object(&self, row: &String) -> Result<Option<Vec<u8>>, IndexError> {
//!         Ok(Some(row.as_bytes().to_vec()))
//!     }
//! }
//!
//! let schema = DbSchema::new().table(
//!     TableSchema::builder("names")
//!         .index(IndexSchema::single("id", Id))
//!         .build(),
//! );
//! assert!(schema.validate().is_ok());
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod schema;
mod types;
mod value;

pub use error::{Error, IndexError, Result};
pub use types::DataType;
pub use value::Value;
