//! Data type definitions for the Arbor store.
//!
//! Index definitions declare the type of the field they extract so that
//! both row values and query arguments can be checked before encoding.

/// Types an index key can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
    /// Date and time stored as Unix timestamp (milliseconds)
    DateTime,
    /// Binary data
    Bytes,
}

impl DataType {
    /// Returns the encoded key width for fixed-size types.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            DataType::Boolean => Some(1),
            DataType::Int32 => Some(4),
            DataType::Int64 | DataType::UInt64 | DataType::Float64 | DataType::DateTime => Some(8),
            DataType::String | DataType::Bytes => None,
        }
    }

    /// Returns whether a value of type `other` may be used where `self` is expected.
    pub fn accepts(&self, other: DataType) -> bool {
        *self == other || matches!((self, other), (DataType::Int64, DataType::Int32))
    }
}
