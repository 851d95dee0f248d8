//! Transactions over the store.
//!
//! A transaction copies the store root when it starts and works on that
//! private view. Index trees are opened for writing lazily, the first time
//! a write touches them, and are folded back into the root on commit.

use crate::iter::ResultIterator;
use crate::space::{entry_key, index_path, IndexTree, MetaTree};
use crate::store::Store;
use alloc::sync::Arc;
use alloc::vec::Vec;
use arbor_core::schema::{IndexerKind, TableSchema, ID_INDEX};
use arbor_core::{Error, Result, Value};
use arbor_index::{RadixIterator, RadixTxn};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use tracing::{debug, debug_span, trace};

/// Index entries of one row: for each index, the keys pointing at the row.
type RowEntries<'s> = Vec<(&'s str, Vec<Vec<u8>>)>;

/// A read/write transaction.
///
/// Reads see the root as of [`Store::txn`] plus this transaction's own
/// writes. Nothing becomes visible to other transactions until
/// [`commit`](Self::commit). Dropping a transaction discards its writes.
pub struct Transaction<'a, R> {
    store: &'a Store<R>,
    /// Private view of the meta tree.
    root: RadixTxn<IndexTree<R>>,
    /// Index trees opened for writing, keyed by index path.
    modified: HashMap<Vec<u8>, RadixTxn<Arc<R>>>,
}

impl<'a, R> Transaction<'a, R> {
    pub(crate) fn new(store: &'a Store<R>, root: MetaTree<R>) -> Self {
        Self {
            store,
            root: root.txn(),
            modified: HashMap::new(),
        }
    }

    /// Returns true if the transaction has written to at least one index.
    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    /// Inserts a row, replacing the row with the same primary key if any.
    ///
    /// Every key of the row is computed before anything is written, so an
    /// indexer error leaves the transaction unchanged.
    pub fn insert(&mut self, table: &str, row: impl Into<Arc<R>>) -> Result<()> {
        let row = row.into();
        let store = self.store;
        let schema = table_schema(store, table)?;

        let id = primary_key(schema, &row)?;
        let entries = row_entries(schema, &row, &id)?;
        let existing = self.row_by_id(table, &id)?;
        let stale = match &existing {
            Some(old) => row_entries(schema, old, &id)?,
            None => Vec::new(),
        };

        for (index, keys) in stale {
            let txn = self.write(table, index)?;
            for key in &keys {
                txn.delete(key);
            }
        }

        let mut written = 0;
        for (index, keys) in entries {
            let txn = self.write(table, index)?;
            for key in &keys {
                txn.insert(key, Arc::clone(&row));
            }
            written += keys.len();
        }

        trace!(
            table,
            keys = written,
            replaced = existing.is_some(),
            "row inserted"
        );
        Ok(())
    }

    /// Deletes the stored row with the same primary key as `row`.
    ///
    /// The stored row's own fields decide which keys are removed, so a
    /// caller may pass a copy that only carries the primary key.
    pub fn delete(&mut self, table: &str, row: &R) -> Result<()> {
        let store = self.store;
        let schema = table_schema(store, table)?;

        let id = primary_key(schema, row)?;
        let existing = self
            .row_by_id(table, &id)?
            .ok_or_else(|| Error::not_found(table))?;
        let entries = row_entries(schema, &existing, &id)?;

        let mut removed = 0;
        for (index, keys) in entries {
            let txn = self.write(table, index)?;
            for key in &keys {
                if txn.delete(key).is_some() {
                    removed += 1;
                }
            }
        }

        trace!(table, keys = removed, "row deleted");
        Ok(())
    }

    /// Returns the first row, in key order, matching the lookup.
    pub fn first(&self, table: &str, index: &str, args: &[Value]) -> Result<Option<Arc<R>>> {
        Ok(self.get(table, index, args)?.next())
    }

    /// Returns every row matching the lookup, in key order.
    ///
    /// With no arguments every row of the index is returned. Otherwise the
    /// arguments are encoded by the index and used as a key prefix; a
    /// multi-valued index returns a row once per matching element.
    pub fn get(&self, table: &str, index: &str, args: &[Value]) -> Result<ResultIterator<R>> {
        let prefix = lookup_key(self.store, table, index, args)?;
        let mut iter = self.read(table, index)?;
        iter.seek_prefix(&prefix);
        Ok(ResultIterator::new(iter))
    }

    /// Publishes the writes of this transaction as the new store root.
    ///
    /// A transaction that wrote nothing leaves the root untouched.
    pub fn commit(self) {
        let Self {
            store,
            mut root,
            modified,
        } = self;

        if modified.is_empty() {
            trace!("read-only transaction committed");
            return;
        }

        let _span = debug_span!("commit", indexes = modified.len()).entered();
        for (path, txn) in modified {
            root.insert(&path, txn.commit());
        }
        let root = root.commit();
        let size = root.len();
        store.publish(root);
        debug!(size, "transaction committed");
    }

    /// Discards the writes of this transaction.
    pub fn abort(self) {
        debug!(indexes = self.modified.len(), "transaction aborted");
    }

    /// Opens an iterator over one index, preferring this transaction's
    /// pending writes over the snapshot.
    fn read(&self, table: &str, index: &str) -> Result<RadixIterator<Arc<R>>> {
        let path = index_path(table, index);
        if let Some(txn) = self.modified.get(&path) {
            return Ok(txn.iter());
        }
        self.root
            .get(&path)
            .map(|tree| tree.iter())
            .ok_or_else(|| Error::index_not_found(table, index))
    }

    /// Returns the writable view of one index, opening it on first use.
    fn write(&mut self, table: &str, index: &str) -> Result<&mut RadixTxn<Arc<R>>> {
        match self.modified.entry(index_path(table, index)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let tree = self
                    .root
                    .get(entry.key())
                    .ok_or_else(|| Error::index_not_found(table, index))?;
                let txn = tree.txn();
                Ok(entry.insert(txn))
            }
        }
    }

    fn row_by_id(&self, table: &str, id: &[u8]) -> Result<Option<Arc<R>>> {
        let key = entry_key(id, id);
        let path = index_path(table, ID_INDEX);
        let found = match self.modified.get(&path) {
            Some(txn) => txn.get(&key),
            None => self
                .root
                .get(&path)
                .ok_or_else(|| Error::index_not_found(table, ID_INDEX))?
                .get(&key),
        };
        Ok(found.cloned())
    }
}

impl<R> core::fmt::Debug for Transaction<'_, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Transaction")
            .field("indexes", &self.root.len())
            .field("modified", &self.modified.len())
            .finish()
    }
}

fn table_schema<'s, R>(store: &'s Store<R>, table: &str) -> Result<&'s TableSchema<R>> {
    store
        .schema()
        .get_table(table)
        .ok_or_else(|| Error::table_not_found(table))
}

/// Extracts the primary key of a row.
fn primary_key<R>(schema: &TableSchema<R>, row: &R) -> Result<Vec<u8>> {
    let indexer = match schema.id_index().and_then(|index| index.get_indexer()) {
        Some(IndexerKind::Single(indexer)) => indexer,
        _ => return Err(Error::invalid_schema("id index must be a SingleIndexer")),
    };
    indexer
        .from_object(row)
        .map_err(|e| Error::index_build(ID_INDEX, e))?
        .ok_or_else(|| Error::missing_primary_key(schema.name()))
}

/// Computes the keys of a row in every index of its table.
fn row_entries<'s, R>(schema: &'s TableSchema<R>, row: &R, id: &[u8]) -> Result<RowEntries<'s>> {
    schema
        .indexes()
        .map(|index| -> Result<(&'s str, Vec<Vec<u8>>)> {
            let indexer = index
                .get_indexer()
                .ok_or_else(|| Error::index_not_found(schema.name(), index.name()))?;
            let keys: Vec<Vec<u8>> = indexer
                .fragments(row)
                .map_err(|e| Error::index_build(index.name(), e))?
                .iter()
                .map(|fragment| entry_key(fragment, id))
                .collect();
            Ok((index.name(), keys))
        })
        .collect()
}

/// Encodes lookup arguments into the key prefix to seek.
fn lookup_key<R>(store: &Store<R>, table: &str, index: &str, args: &[Value]) -> Result<Vec<u8>> {
    let indexer = table_schema(store, table)?
        .get_index(index)
        .and_then(|schema| schema.get_indexer())
        .ok_or_else(|| Error::index_not_found(table, index))?;
    if args.is_empty() {
        return Ok(Vec::new());
    }
    indexer.from_args(args).map_err(|e| Error::argument(index, e))
}
