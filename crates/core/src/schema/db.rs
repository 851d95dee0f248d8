//! Database schema: the full set of tables a store is created with.

use super::table::TableSchema;
use crate::error::{Error, Result};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

/// The schema for a whole store. A store requires a valid schema;
/// validation runs when the store is initialized.
pub struct DbSchema<R> {
    /// Table name → table schema. Each key must match the table's own name.
    tables: BTreeMap<String, TableSchema<R>>,
}

impl<R> DbSchema<R> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Adds a table keyed by its own name.
    pub fn table(mut self, table: TableSchema<R>) -> Self {
        let key = String::from(table.name());
        self.tables.insert(key, table);
        self
    }

    /// Registers a table under an explicit key. The key is checked against
    /// the table name by [`DbSchema::validate`].
    pub fn insert_table(&mut self, key: impl Into<String>, table: TableSchema<R>) {
        self.tables.insert(key.into(), table);
    }

    /// Gets a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableSchema<R>> {
        self.tables.get(name)
    }

    /// Iterates over all tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema<R>> {
        self.tables.values()
    }

    /// Returns the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Validates the schema and every table in it.
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            return Err(Error::invalid_schema("schema has no tables defined"));
        }

        for (name, table) in &self.tables {
            if name != table.name() {
                return Err(Error::invalid_schema(format!(
                    "table name mis-match for '{}'",
                    name
                )));
            }
            table.check().map_err(|message| {
                Error::invalid_schema(format!("table {:?}: {}", name, message))
            })?;
        }
        Ok(())
    }
}

impl<R> Default for DbSchema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for DbSchema<R> {
    fn clone(&self) -> Self {
        Self {
            tables: self.tables.clone(),
        }
    }
}

impl<R> core::fmt::Debug for DbSchema<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DbSchema")
            .field("tables", &self.tables)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::schema::index::IndexSchema;
    use crate::schema::indexer::{Indexer, SingleIndexer};
    use crate::value::Value;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    struct Key;

    impl Indexer for Key {
        fn from_args(&self, _args: &[Value]) -> core::result::Result<Vec<u8>, IndexError> {
            Ok(Vec::new())
        }
    }

    impl SingleIndexer<u8> for Key {
        fn from_object(&self, row: &u8) -> core::result::Result<Option<Vec<u8>>, IndexError> {
            Ok(Some(alloc::vec![*row]))
        }
    }

    fn table(name: &str) -> TableSchema<u8> {
        TableSchema::builder(name)
            .index(IndexSchema::single("id", Key))
            .build()
    }

    #[test]
    fn test_valid_schema() {
        let schema = DbSchema::new().table(table("user")).table(table("org"));
        assert!(schema.validate().is_ok());
        assert_eq!(schema.table_count(), 2);
        assert!(schema.get_table("org").is_some());
    }

    #[test]
    fn test_empty_schema() {
        let err = DbSchema::<u8>::new().validate().unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("no tables"));
    }

    #[test]
    fn test_table_name_mismatch() {
        let mut schema = DbSchema::new();
        schema.insert_table("users", table("user"));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("table name mis-match for 'users'"));
    }

    #[test]
    fn test_invalid_table_names_offender() {
        let schema = DbSchema::<u8>::new().table(TableSchema::new("user"));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("table \"user\""));
    }
}
