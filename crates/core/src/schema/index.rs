//! Index definition for Arbor table schemas.

use super::indexer::{IndexerKind, MultiIndexer, SingleIndexer};
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

/// Name of the index every table must define. Its key identifies a row.
pub const ID_INDEX: &str = "id";

/// The schema of one index. An index defines how a table is queried.
pub struct IndexSchema<R> {
    /// Index name, unique within its table.
    name: String,
    /// Extraction capability.
    indexer: Option<IndexerKind<R>>,
}

impl<R> IndexSchema<R> {
    /// Creates an index definition without an indexer attached yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexer: None,
        }
    }

    /// Creates an index backed by a single-valued indexer.
    pub fn single<I>(name: impl Into<String>, indexer: I) -> Self
    where
        I: SingleIndexer<R> + 'static,
    {
        Self::new(name).indexer(IndexerKind::Single(Arc::new(indexer)))
    }

    /// Creates an index backed by a multi-valued indexer.
    pub fn multi<I>(name: impl Into<String>, indexer: I) -> Self
    where
        I: MultiIndexer<R> + 'static,
    {
        Self::new(name).indexer(IndexerKind::Multi(Arc::new(indexer)))
    }

    /// Sets the indexer.
    pub fn indexer(mut self, indexer: IndexerKind<R>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Returns the index name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attached indexer, if any.
    #[inline]
    pub fn get_indexer(&self) -> Option<&IndexerKind<R>> {
        self.indexer.as_ref()
    }

    /// Validates the index definition.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("missing index name".into());
        }
        if self.indexer.is_none() {
            return Err(format!("missing index function for '{}'", self.name));
        }
        Ok(())
    }
}

impl<R> Clone for IndexSchema<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            indexer: self.indexer.clone(),
        }
    }
}

impl<R> core::fmt::Debug for IndexSchema<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexSchema")
            .field("name", &self.name)
            .field("indexer", &self.indexer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::schema::indexer::Indexer;
    use crate::value::Value;
    use alloc::vec::Vec;

    struct Unit;

    impl Indexer for Unit {
        fn from_args(&self, _args: &[Value]) -> Result<Vec<u8>, IndexError> {
            Ok(Vec::new())
        }
    }

    impl SingleIndexer<()> for Unit {
        fn from_object(&self, _row: &()) -> Result<Option<Vec<u8>>, IndexError> {
            Ok(None)
        }
    }

    #[test]
    fn test_index_schema() {
        let idx: IndexSchema<()> = IndexSchema::single("id", Unit);
        assert_eq!(idx.name(), "id");
        assert!(idx.get_indexer().unwrap().is_single());
        assert!(idx.check().is_ok());
    }

    #[test]
    fn test_missing_indexer() {
        let idx: IndexSchema<()> = IndexSchema::new("age");
        assert_eq!(idx.check().unwrap_err(), "missing index function for 'age'");
    }

    #[test]
    fn test_missing_name() {
        let idx: IndexSchema<()> = IndexSchema::single("", Unit);
        assert_eq!(idx.check().unwrap_err(), "missing index name");
    }
}
