//! The store: a schema and the current root of the index space.

use crate::space::{self, MetaTree};
use crate::transaction::Transaction;
use arbor_core::schema::DbSchema;
use arbor_core::Result;
use core::fmt;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory multi-index store.
///
/// Readers and writers work on snapshots taken from the store root, so a
/// reader never blocks and never observes a partially applied write. Only
/// one write transaction may be in progress at a time; callers that write
/// from several threads must serialize their writers, for example behind a
/// mutex. Two writers committing concurrently would silently drop the
/// earlier commit.
pub struct Store<R> {
    schema: DbSchema<R>,
    root: RwLock<MetaTree<R>>,
}

impl<R> Store<R> {
    /// Validates the schema and creates an empty store.
    pub fn init(schema: DbSchema<R>) -> Result<Self> {
        schema.validate()?;
        let root = space::build(&schema);
        debug!(
            tables = schema.table_count(),
            indexes = root.len(),
            "store initialized"
        );
        Ok(Self {
            schema,
            root: RwLock::new(root),
        })
    }

    /// Returns the schema.
    pub fn schema(&self) -> &DbSchema<R> {
        &self.schema
    }

    /// Starts a transaction over the current root.
    pub fn txn(&self) -> Transaction<'_, R> {
        Transaction::new(self, self.snapshot())
    }

    pub(crate) fn snapshot(&self) -> MetaTree<R> {
        self.root.read().clone()
    }

    /// Replaces the root. The previous root is released outside the lock.
    pub(crate) fn publish(&self, root: MetaTree<R>) {
        let previous = core::mem::replace(&mut *self.root.write(), root);
        drop(previous);
    }
}

impl<R> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("schema", &self.schema)
            .field("indexes", &self.root.read().len())
            .finish()
    }
}
