//! Layout of the index trees inside the store root.
//!
//! The root is a meta tree mapping `table.index` to that index's own tree.
//! Each index tree maps `fragment ++ id` to the row, where `fragment` is the
//! key produced by the index's indexer and `id` the primary key of the row.

use alloc::sync::Arc;
use alloc::vec::Vec;
use arbor_core::schema::DbSchema;
use arbor_index::RadixTree;

/// Tree holding the entries of one index.
pub type IndexTree<R> = RadixTree<Arc<R>>;

/// Tree holding every index tree, keyed by [`index_path`].
pub type MetaTree<R> = RadixTree<IndexTree<R>>;

/// Returns the meta tree key of an index. Table names never contain `.`,
/// so the first `.` separates the table from the index.
pub fn index_path(table: &str, index: &str) -> Vec<u8> {
    let mut path = Vec::with_capacity(table.len() + index.len() + 1);
    path.extend_from_slice(table.as_bytes());
    path.push(b'.');
    path.extend_from_slice(index.as_bytes());
    path
}

/// Returns the key of a row in an index: the fragment followed by the id.
pub fn entry_key(fragment: &[u8], id: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(fragment.len() + id.len());
    key.extend_from_slice(fragment);
    key.extend_from_slice(id);
    key
}

/// Builds a meta tree with one empty index tree per declared index.
pub(crate) fn build<R>(schema: &DbSchema<R>) -> MetaTree<R> {
    let mut txn = MetaTree::new().txn();
    for table in schema.tables() {
        for index in table.indexes() {
            txn.insert(&index_path(table.name(), index.name()), IndexTree::new());
        }
    }
    txn.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use arbor_core::schema::{IndexSchema, Indexer, SingleIndexer, TableSchema};
    use arbor_core::{IndexError, Value};

    struct Bytes;

    impl Indexer for Bytes {
        fn from_args(&self, _args: &[Value]) -> Result<Vec<u8>, IndexError> {
            Ok(Vec::new())
        }
    }

    impl SingleIndexer<String> for Bytes {
        fn from_object(&self, row: &String) -> Result<Option<Vec<u8>>, IndexError> {
            Ok(Some(row.as_bytes().to_vec()))
        }
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path("user", "age"), b"user.age".to_vec());
        assert_eq!(entry_key(b"ab", b"1\0"), b"ab1\0".to_vec());
    }

    #[test]
    fn test_build_one_tree_per_index() {
        let schema = DbSchema::new()
            .table(
                TableSchema::builder("user")
                    .index(IndexSchema::single("id", Bytes))
                    .index(IndexSchema::single("name", Bytes))
                    .build(),
            )
            .table(TableSchema::builder("post").index(IndexSchema::single("id", Bytes)).build());

        let meta = build(&schema);
        assert_eq!(meta.len(), 3);
        assert!(meta.get(b"user.id").is_some_and(|t| t.is_empty()));
        assert!(meta.get(b"user.name").is_some());
        assert!(meta.get(b"post.id").is_some());
        assert!(meta.get(b"post.name").is_none());
    }
}
