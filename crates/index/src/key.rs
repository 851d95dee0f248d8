//! Order-preserving key encoding.
//!
//! Values are encoded so that comparing the encoded bytes gives the same
//! order as comparing the values:
//!
//! - `Boolean`: one byte, 0 or 1
//! - signed integers and `DateTime`: big-endian with the sign bit flipped
//! - `UInt64`: big-endian
//! - `Float64`: IEEE-754 bits with the total-order transform
//! - `String` and `Bytes`: escaped bytes followed by a `0x00` terminator, so
//!   that an exact lookup never matches a longer value. Inside the value
//!   `0x00` becomes `0x01 0x01` and `0x01` becomes `0x01 0x02`, which keeps
//!   the terminator unique without changing the order.

use alloc::string::String;
use alloc::vec::Vec;
use arbor_core::{DataType, IndexError, Value};

/// Encodes one typed field into key bytes.
#[derive(Clone, Debug)]
pub struct KeyEncoder {
    field: String,
    data_type: DataType,
    lowercase: bool,
}

impl KeyEncoder {
    /// Creates an encoder for a field of the given type.
    pub fn new(field: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: field.into(),
            data_type,
            lowercase: false,
        }
    }

    /// Lowercases string values before encoding.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Returns the field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the declared type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Encodes a value extracted from a row. `Null` means "no value".
    pub fn encode(&self, value: &Value) -> Result<Option<Vec<u8>>, IndexError> {
        let Some(got) = value.data_type() else {
            return Ok(None);
        };
        if !self.data_type.accepts(got) {
            return Err(IndexError::type_mismatch(&self.field, self.data_type, got));
        }
        let mut out = Vec::with_capacity(self.data_type.fixed_width().unwrap_or(16));
        self.write(value, &mut out);
        Ok(Some(out))
    }

    /// Encodes a single query argument.
    pub fn encode_arg(&self, args: &[Value]) -> Result<Vec<u8>, IndexError> {
        let [arg] = args else {
            return Err(IndexError::arity(1, args.len()));
        };
        match arg.data_type() {
            None => Err(IndexError::invalid_argument("argument must not be null")),
            Some(got) if !self.data_type.accepts(got) => Err(IndexError::invalid_argument(
                alloc::format!("argument must be of type {:?}: {:?}", self.data_type, arg),
            )),
            Some(_) => {
                let mut out = Vec::new();
                self.write(arg, &mut out);
                Ok(out)
            }
        }
    }

    fn write(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Null => {}
            Value::Boolean(b) => out.push(u8::from(*b)),
            Value::Int32(v) if self.data_type == DataType::Int64 => write_i64(i64::from(*v), out),
            Value::Int32(v) => out.extend_from_slice(&((*v as u32) ^ (1 << 31)).to_be_bytes()),
            Value::Int64(v) | Value::DateTime(v) => write_i64(*v, out),
            Value::UInt64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Value::Float64(v) => {
                let bits = v.to_bits();
                let ordered = if bits >> 63 == 1 { !bits } else { bits | (1 << 63) };
                out.extend_from_slice(&ordered.to_be_bytes());
            }
            Value::String(s) if self.lowercase => {
                write_escaped(s.to_lowercase().as_bytes(), out)
            }
            Value::String(s) => write_escaped(s.as_bytes(), out),
            Value::Bytes(b) => write_escaped(b, out),
        }
    }
}

fn write_escaped(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            0x00 => out.extend_from_slice(&[0x01, 0x01]),
            0x01 => out.extend_from_slice(&[0x01, 0x02]),
            _ => out.push(b),
        }
    }
    out.push(0x00);
}

#[inline]
fn write_i64(v: i64, out: &mut Vec<u8>) {
    out.extend_from_slice(&((v as u64) ^ (1 << 63)).to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn enc(data_type: DataType, value: Value) -> Vec<u8> {
        KeyEncoder::new("f", data_type).encode(&value).unwrap().unwrap()
    }

    #[test]
    fn test_integer_order() {
        let values = [i64::MIN, -300, -1, 0, 1, 30, 31, i64::MAX];
        let encoded: Vec<Vec<u8>> = values
            .iter()
            .map(|&v| enc(DataType::Int64, Value::Int64(v)))
            .collect();
        assert!(encoded.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_float_order() {
        let values = [f64::NEG_INFINITY, -2.5, -0.0, 0.0, 1e-9, 3.5, f64::INFINITY];
        let encoded: Vec<Vec<u8>> = values
            .iter()
            .map(|&v| enc(DataType::Float64, Value::Float64(v)))
            .collect();
        assert!(encoded.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_int32_widens_to_int64() {
        assert_eq!(
            enc(DataType::Int64, Value::Int32(30)),
            enc(DataType::Int64, Value::Int64(30))
        );
        assert_eq!(enc(DataType::Int32, Value::Int32(-1)).len(), 4);
    }

    #[test]
    fn test_string_terminator_and_lowercase() {
        assert_eq!(enc(DataType::String, "ab".into()), b"ab\0".to_vec());
        let lower = KeyEncoder::new("name", DataType::String).lowercase(true);
        assert_eq!(
            lower.encode(&"AbC".into()).unwrap(),
            Some(b"abc\0".to_vec())
        );
        assert_eq!(lower.encode_arg(&["ABC".into()]).unwrap(), b"abc\0".to_vec());
    }

    #[test]
    fn test_bool_and_bytes() {
        assert_eq!(enc(DataType::Boolean, true.into()), vec![1]);
        assert_eq!(enc(DataType::Boolean, false.into()), vec![0]);
        assert_eq!(enc(DataType::Bytes, vec![9u8, 0, 9].into()), vec![9, 1, 1, 9, 0]);
    }

    #[test]
    fn test_variable_width_is_self_delimiting() {
        // An exact key must never be a prefix of a longer value's key.
        let short = enc(DataType::Bytes, b"ab".to_vec().into());
        let long = enc(DataType::Bytes, b"abc".to_vec().into());
        assert!(!long.starts_with(&short));

        let plain = enc(DataType::String, "a".into());
        let nul = enc(DataType::String, "a\0b".into());
        let soh = enc(DataType::String, "a\u{1}".into());
        assert_eq!(nul, b"a\x01\x01b\0".to_vec());
        assert!(!nul.starts_with(&plain));
        assert!(!soh.starts_with(&plain));
    }

    #[test]
    fn test_variable_width_order() {
        let values: [&[u8]; 7] = [b"", b"\0", b"\0\0", b"\x01", b"\x01\0", b"\x02", b"a"];
        let encoded: Vec<Vec<u8>> = values
            .iter()
            .map(|v| enc(DataType::Bytes, v.to_vec().into()))
            .collect();
        assert!(encoded.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_null_is_missing() {
        let e = KeyEncoder::new("age", DataType::Int64);
        assert_eq!(e.encode(&Value::Null), Ok(None));
        assert!(matches!(
            e.encode_arg(&[Value::Null]),
            Err(IndexError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let e = KeyEncoder::new("age", DataType::Int64);
        assert_eq!(
            e.encode(&"thirty".into()),
            Err(IndexError::type_mismatch("age", DataType::Int64, DataType::String))
        );
        assert!(matches!(
            e.encode_arg(&["thirty".into()]),
            Err(IndexError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_arity() {
        let e = KeyEncoder::new("age", DataType::Int64);
        assert_eq!(e.encode_arg(&[]), Err(IndexError::arity(1, 0)));
        assert_eq!(
            e.encode_arg(&[1i64.into(), 2i64.into()]),
            Err(IndexError::arity(1, 2))
        );
    }
}
