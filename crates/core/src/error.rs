//! Error types for the Arbor store.

use crate::types::DataType;
use alloc::string::String;
use thiserror::Error;

/// Result type alias for Arbor operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by indexers while extracting keys from rows or
/// converting query arguments into lookup keys.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    /// Wrong number of query arguments.
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: usize, got: usize },
    /// A value had a different type than the index declares.
    #[error("field '{field}' is of type {got:?}; want {expected:?}")]
    TypeMismatch {
        field: String,
        expected: DataType,
        got: DataType,
    },
    /// A query argument cannot be used by this index.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    /// A user supplied extractor failed.
    #[error("extraction failed: {message}")]
    Extraction { message: String },
}

impl IndexError {
    /// Creates an arity error.
    pub fn arity(expected: usize, got: usize) -> Self {
        IndexError::Arity { expected, got }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: DataType, got: DataType) -> Self {
        IndexError::TypeMismatch {
            field: field.into(),
            expected,
            got,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        IndexError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        IndexError::Extraction {
            message: message.into(),
        }
    }
}

/// Error types for Arbor store operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid schema definition.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
    /// Unknown table name.
    #[error("invalid table '{name}'")]
    TableNotFound { name: String },
    /// Unknown index name.
    #[error("invalid index '{index}' on table '{table}'")]
    IndexNotFound { table: String, index: String },
    /// An extractor failed while building the keys of a row.
    #[error("failed to build index '{index}': {source}")]
    IndexBuild {
        index: String,
        #[source]
        source: IndexError,
    },
    /// The row has no value for the `id` index.
    #[error("object missing primary index in table '{table}'")]
    MissingPrimaryKey { table: String },
    /// Query arguments could not be turned into a lookup key.
    #[error("index '{index}' argument error: {source}")]
    Argument {
        index: String,
        #[source]
        source: IndexError,
    },
    /// No row with the given id exists.
    #[error("row not found in table '{table}'")]
    NotFound { table: String },
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates an index not found error.
    pub fn index_not_found(table: impl Into<String>, index: impl Into<String>) -> Self {
        Error::IndexNotFound {
            table: table.into(),
            index: index.into(),
        }
    }

    /// Creates an index build error.
    pub fn index_build(index: impl Into<String>, source: IndexError) -> Self {
        Error::IndexBuild {
            index: index.into(),
            source,
        }
    }

    /// Creates a missing primary key error.
    pub fn missing_primary_key(table: impl Into<String>) -> Self {
        Error::MissingPrimaryKey {
            table: table.into(),
        }
    }

    /// Creates an argument error.
    pub fn argument(index: impl Into<String>, source: IndexError) -> Self {
        Error::Argument {
            index: index.into(),
            source,
        }
    }

    /// Creates a not found error.
    pub fn not_found(table: impl Into<String>) -> Self {
        Error::NotFound {
            table: table.into(),
        }
    }

    /// Returns true for errors raised while validating a schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::InvalidSchema { .. })
    }
}
