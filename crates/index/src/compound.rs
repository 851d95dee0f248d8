//! Compound indexes over several fields.

use alloc::sync::Arc;
use alloc::vec::Vec;
use arbor_core::schema::{Indexer, SingleIndexer};
use arbor_core::{IndexError, Value};

/// Concatenates the keys of several single-valued indexers.
///
/// Lookups may pass fewer arguments than there are fields; the resulting
/// key is then a prefix matching every row that shares the leading fields.
pub struct CompoundIndex<R> {
    indexes: Vec<Arc<dyn SingleIndexer<R>>>,
    allow_missing: bool,
}

impl<R> CompoundIndex<R> {
    /// Creates an empty compound index.
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
            allow_missing: false,
        }
    }

    /// Appends a field.
    pub fn with<I>(mut self, index: I) -> Self
    where
        I: SingleIndexer<R> + 'static,
    {
        self.indexes.push(Arc::new(index));
        self
    }

    /// When set, a row missing a trailing field is indexed by the fields
    /// before it instead of being skipped.
    pub fn allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no field was added.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl<R> Default for CompoundIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Indexer for CompoundIndex<R> {
    fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
        if args.is_empty() || args.len() > self.indexes.len() {
            return Err(IndexError::arity(self.indexes.len(), args.len()));
        }
        let mut out = Vec::new();
        for (index, arg) in self.indexes.iter().zip(args) {
            out.extend(index.from_args(core::slice::from_ref(arg))?);
        }
        Ok(out)
    }
}

impl<R> SingleIndexer<R> for CompoundIndex<R> {
    fn from_object(&self, row: &R) -> Result<Option<Vec<u8>>, IndexError> {
        let mut out = Vec::new();
        for index in &self.indexes {
            match index.from_object(row)? {
                Some(key) => out.extend(key),
                None if self.allow_missing => break,
                None => return Ok(None),
            }
        }
        if out.is_empty() {
            return Ok(None);
        }
        Ok(Some(out))
    }
}
