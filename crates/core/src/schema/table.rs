//! Table definition for Arbor schemas.

use super::index::{IndexSchema, ID_INDEX};
use crate::error::{Error, Result};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

/// The schema of a single table.
pub struct TableSchema<R> {
    /// Table name. Must match the key in the database schema.
    name: String,
    /// Index name → index schema. Each key must match the index's own name.
    indexes: BTreeMap<String, IndexSchema<R>>,
}

impl<R> TableSchema<R> {
    /// Creates a table without indexes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexes: BTreeMap::new(),
        }
    }

    /// Starts a builder for a table.
    pub fn builder(name: impl Into<String>) -> TableBuilder<R> {
        TableBuilder {
            table: Self::new(name),
        }
    }

    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets an index by name.
    pub fn get_index(&self, name: &str) -> Option<&IndexSchema<R>> {
        self.indexes.get(name)
    }

    /// Returns the `id` index.
    pub fn id_index(&self) -> Option<&IndexSchema<R>> {
        self.indexes.get(ID_INDEX)
    }

    /// Iterates over all indexes in name order.
    pub fn indexes(&self) -> impl Iterator<Item = &IndexSchema<R>> {
        self.indexes.values()
    }

    /// Returns all index names.
    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(|s| s.as_str())
    }

    /// Registers an index under an explicit key. The key is checked against
    /// the index name by [`TableSchema::validate`].
    pub fn insert_index(&mut self, key: impl Into<String>, index: IndexSchema<R>) {
        self.indexes.insert(key.into(), index);
    }

    /// Validates the table schema.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(Error::invalid_schema)
    }

    pub(crate) fn check(&self) -> core::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("missing table name".into());
        }
        // Index trees are addressed as `table.index`.
        if self.name.contains('.') {
            return Err(format!("table name '{}' must not contain '.'", self.name));
        }
        if self.indexes.is_empty() {
            return Err(format!("missing table indexes for '{}'", self.name));
        }

        match self.indexes.get(ID_INDEX) {
            None => return Err("must have id index".into()),
            Some(id) => {
                if !id.get_indexer().is_some_and(|kind| kind.is_single()) {
                    return Err("id index must be a SingleIndexer".into());
                }
            }
        }

        for (name, index) in &self.indexes {
            if name != index.name() {
                return Err(format!("index name mis-match for '{}'", name));
            }
            index
                .check()
                .map_err(|message| format!("index {:?}: {}", name, message))?;
        }
        Ok(())
    }
}

impl<R> Clone for TableSchema<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            indexes: self.indexes.clone(),
        }
    }
}

impl<R> core::fmt::Debug for TableSchema<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableSchema")
            .field("name", &self.name)
            .field("indexes", &self.indexes)
            .finish()
    }
}

/// Builder for creating table definitions.
pub struct TableBuilder<R> {
    table: TableSchema<R>,
}

impl<R> TableBuilder<R> {
    /// Adds an index keyed by its own name.
    pub fn index(mut self, index: IndexSchema<R>) -> Self {
        let key = String::from(index.name());
        self.table.indexes.insert(key, index);
        self
    }

    /// Builds the table schema.
    pub fn build(self) -> TableSchema<R> {
        self.table
    }
}
