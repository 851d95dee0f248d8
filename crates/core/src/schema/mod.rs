//! Schema module for the Arbor store.
//!
//! A schema maps table names to tables, and each table maps index names to
//! index definitions carrying an indexer. Names must match their map keys
//! and every table needs a single-valued `id` index.

mod db;
mod index;
mod indexer;
mod table;

pub use db::DbSchema;
pub use index::{IndexSchema, ID_INDEX};
pub use indexer::{Indexer, IndexerKind, MultiIndexer, SingleIndexer};
pub use table::{TableBuilder, TableSchema};
