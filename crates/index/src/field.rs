//! Field indexers.
//!
//! Rows are opaque to the store, so each index reads its field through a
//! closure supplied when the schema is built. The closure returns the field
//! as a [`Value`]; the indexer checks it against the declared type and
//! encodes it with a [`KeyEncoder`].

use crate::key::KeyEncoder;
use alloc::string::String;
use alloc::vec::Vec;
use arbor_core::schema::{Indexer, MultiIndexer, SingleIndexer};
use arbor_core::{DataType, IndexError, Value};

/// Single-valued index over one field of a row.
///
/// ```rust
/// use arbor_core::schema::SingleIndexer;
/// use arbor_core::{DataType, Value};
/// use arbor_index::FieldIndex;
///
/// struct User { age: Option<i64> }
///
/// let index = FieldIndex::new("age", DataType::Int64, |u: &User| u.age.map(Value::from));
/// assert!(index.from_object(&User { age: Some(30) }).unwrap().is_some());
/// assert!(index.from_object(&User { age: None }).unwrap().is_none());
/// ```
pub struct FieldIndex<F> {
    encoder: KeyEncoder,
    extract: F,
}

impl<F> FieldIndex<F> {
    /// Creates an index over a field of the given type.
    pub fn new(field: impl Into<String>, data_type: DataType, extract: F) -> Self {
        Self {
            encoder: KeyEncoder::new(field, data_type),
            extract,
        }
    }

    /// Lowercases string values and arguments, for case-insensitive lookups.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.encoder = self.encoder.lowercase(lowercase);
        self
    }

    /// Returns the key encoder.
    pub fn encoder(&self) -> &KeyEncoder {
        &self.encoder
    }
}

impl<F: Send + Sync> Indexer for FieldIndex<F> {
    fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
        self.encoder.encode_arg(args)
    }
}

impl<R, F> SingleIndexer<R> for FieldIndex<F>
where
    F: Fn(&R) -> Option<Value> + Send + Sync,
{
    fn from_object(&self, row: &R) -> Result<Option<Vec<u8>>, IndexError> {
        match (self.extract)(row) {
            Some(value) => self.encoder.encode(&value),
            None => Ok(None),
        }
    }
}

/// Multi-valued index over a list field of a row. Each element is stored
/// as a separate key pointing at the same row; lookups take one element.
pub struct MultiFieldIndex<F> {
    encoder: KeyEncoder,
    extract: F,
}

impl<F> MultiFieldIndex<F> {
    /// Creates an index over a list field whose elements have the given type.
    pub fn new(field: impl Into<String>, data_type: DataType, extract: F) -> Self {
        Self {
            encoder: KeyEncoder::new(field, data_type),
            extract,
        }
    }

    /// Lowercases string values and arguments.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.encoder = self.encoder.lowercase(lowercase);
        self
    }
}

impl<F: Send + Sync> Indexer for MultiFieldIndex<F> {
    fn from_args(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
        self.encoder.encode_arg(args)
    }
}

impl<R, F> MultiIndexer<R> for MultiFieldIndex<F>
where
    F: Fn(&R) -> Vec<Value> + Send + Sync,
{
    fn from_object(&self, row: &R) -> Result<Option<Vec<Vec<u8>>>, IndexError> {
        let mut keys = Vec::new();
        for value in (self.extract)(row) {
            if let Some(key) = self.encoder.encode(&value)? {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            return Ok(None);
        }
        Ok(Some(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    struct User {
        id: String,
        active: bool,
        tags: Vec<String>,
        score: Value,
    }

    fn user() -> User {
        User {
            id: "42".to_string(),
            active: true,
            tags: vec!["Admin".to_string(), "ops".to_string()],
            score: Value::Float64(1.5),
        }
    }

    #[test]
    fn test_string_field() {
        let index = FieldIndex::new("id", DataType::String, |u: &User| {
            Some(Value::from(u.id.clone()))
        });
        assert_eq!(index.from_object(&user()).unwrap(), Some(b"42\0".to_vec()));
        assert_eq!(index.from_args(&["42".into()]).unwrap(), b"42\0".to_vec());
    }

    #[test]
    fn test_bool_field() {
        let index = FieldIndex::new("active", DataType::Boolean, |u: &User| {
            Some(Value::from(u.active))
        });
        assert_eq!(index.from_object(&user()).unwrap(), Some(vec![1]));
        assert_eq!(index.from_args(&[false.into()]).unwrap(), vec![0]);
        assert!(matches!(
            index.from_args(&["yes".into()]),
            Err(IndexError::InvalidArgument { .. })
        ));
        assert_eq!(
            index.from_args(&[true.into(), true.into()]),
            Err(IndexError::arity(1, 2))
        );
    }

    #[test]
    fn test_field_type_mismatch() {
        let index = FieldIndex::new("score", DataType::Int64, |u: &User| Some(u.score.clone()));
        assert_eq!(
            index.from_object(&user()),
            Err(IndexError::type_mismatch("score", DataType::Int64, DataType::Float64))
        );
    }

    #[test]
    fn test_missing_field() {
        let index = FieldIndex::new("nick", DataType::String, |_: &User| None);
        assert_eq!(index.from_object(&user()).unwrap(), None);
    }

    #[test]
    fn test_multi_field() {
        let index = MultiFieldIndex::new("tags", DataType::String, |u: &User| -> Vec<Value> {
            u.tags.iter().map(|t| Value::from(t.as_str())).collect()
        })
        .lowercase(true);

        assert_eq!(
            index.from_object(&user()).unwrap(),
            Some(vec![b"admin\0".to_vec(), b"ops\0".to_vec()])
        );
        assert_eq!(index.from_args(&["ADMIN".into()]).unwrap(), b"admin\0".to_vec());

        let mut bare = user();
        bare.tags.clear();
        assert_eq!(index.from_object(&bare).unwrap(), None);
    }
}
