//! Indexer trait definitions.
//!
//! An indexer is a pair of pure functions defining one lookup path on a
//! table: row → key(s) extraction, and query arguments → lookup key.
//! Every indexer implements [`Indexer`] plus exactly one of
//! [`SingleIndexer`] or [`MultiIndexer`]; the shape is chosen when the
//! index is declared and recorded in [`IndexerKind`].

use crate::error::IndexError;
use crate::value::Value;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Converts query arguments into the key bytes stored in an index.
pub trait Indexer: Send + Sync {
    /// Builds the lookup key (or key prefix) from a list of arguments.
    fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError>;
}

/// An indexer producing at most one key per row.
pub trait SingleIndexer<R>: Indexer {
    /// Extracts the key of a row. `Ok(None)` means the row has no value
    /// for this index and is not indexed by it.
    fn from_object(&self, row: &R) -> Result<Option<Vec<u8>>, IndexError>;
}

/// An indexer producing any number of keys per row. Each key is stored
/// as a separate entry pointing at the same row.
pub trait MultiIndexer<R>: Indexer {
    /// Extracts the keys of a row. `Ok(None)` means the row is not indexed.
    fn from_object(&self, row: &R) -> Result<Option<Vec<Vec<u8>>>, IndexError>;
}

/// The extraction capability attached to an index.
pub enum IndexerKind<R> {
    /// Zero or one key per row.
    Single(Arc<dyn SingleIndexer<R>>),
    /// Zero or more keys per row.
    Multi(Arc<dyn MultiIndexer<R>>),
}

impl<R> IndexerKind<R> {
    /// Returns true for single-valued indexers.
    #[inline]
    pub fn is_single(&self) -> bool {
        matches!(self, IndexerKind::Single(_))
    }

    /// Builds the lookup key from query arguments.
    pub fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
        match self {
            IndexerKind::Single(indexer) => indexer.from_args(args),
            IndexerKind::Multi(indexer) => indexer.from_args(args),
        }
    }

    /// Extracts every key fragment of a row, whatever the indexer shape.
    /// An unindexed row yields an empty list.
    pub fn fragments(&self, row: &R) -> Result<Vec<Vec<u8>>, IndexError> {
        match self {
            IndexerKind::Single(indexer) => Ok(indexer
                .from_object(row)?
                .map_or_else(Vec::new, |key| vec![key])),
            IndexerKind::Multi(indexer) => Ok(indexer.from_object(row)?.unwrap_or_default()),
        }
    }
}

impl<R> Clone for IndexerKind<R> {
    fn clone(&self) -> Self {
        match self {
            IndexerKind::Single(indexer) => IndexerKind::Single(Arc::clone(indexer)),
            IndexerKind::Multi(indexer) => IndexerKind::Multi(Arc::clone(indexer)),
        }
    }
}

impl<R> fmt::Debug for IndexerKind<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexerKind::Single(_) => f.write_str("Single"),
            IndexerKind::Multi(_) => f.write_str("Multi"),
        }
    }
}
