//! The document model.
//!
//! Documents are materialized [`serde_json::Value`] trees. Reading JSON text into a tree and
//! printing a tree back out is left to `serde_json`. [`ValueExt`] adds the decode and encode
//! entry points of this crate to the tree.
use crate::decode::{Decode, DecodeConfig, Decoder};
use crate::encode::{DynEncode, Encode};
use crate::Result;

pub use serde_json::{Map, Number, Value};

/// Decoding and encoding entry points on a [`Value`].
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// use serde_json::json;
///
/// let value = json!([1, 2, null]);
/// assert_eq!(value.decode::<Vec<Option<u8>>>(), Ok(vec![Some(1), Some(2), None]));
/// assert_eq!(value.kind(), "array");
///
/// let encoded = Value::enc(&vec![Some(1u8), None]).unwrap();
/// assert_eq!(encoded, json!([1, null]));
/// ```
pub trait ValueExt {
    /// Decode the value as `T`, with no side-channel contexts.
    fn decode<T: Decode>(&self) -> Result<T>;

    /// Decode the value as `T` with the contexts held in `config`.
    fn decode_with<T: Decode>(&self, config: &DecodeConfig) -> Result<T>;

    /// Encode `data` into a `Value`.
    fn enc<T: Encode + ?Sized>(data: &T) -> Result<Value>;

    /// Encode `data` by its run time type. Nothing to encode is `null`.
    fn dyn_enc<T: DynEncode + ?Sized>(data: &T) -> Result<Value>;

    /// The name of the JSON type, used in diagnostics.
    fn kind(&self) -> &'static str;
}

impl ValueExt for Value {
    fn decode<T: Decode>(&self) -> Result<T> {
        self.decode_with(&DecodeConfig::default())
    }

    fn decode_with<T: Decode>(&self, config: &DecodeConfig) -> Result<T> {
        T::decode(&Decoder::new(self, config))
    }

    fn enc<T: Encode + ?Sized>(data: &T) -> Result<Value> {
        data.encode()
    }

    fn dyn_enc<T: DynEncode + ?Sized>(data: &T) -> Result<Value> {
        data.dyn_encode().map(Option::unwrap_or_default)
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// The number as an integer, if it is one. Floats with no fractional part count.
pub(crate) fn integer(n: &Number) -> Option<i128> {
    const LIMIT: f64 = 18_446_744_073_709_551_616.0; // 2^64

    if let Some(x) = n.as_u64() {
        return Some(x.into());
    }
    if let Some(x) = n.as_i64() {
        return Some(x.into());
    }
    n.as_f64()
        .filter(|x| x.fract() == 0.0 && x.abs() < LIMIT)
        .map(|x| x as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(json!("hi").kind(), "string");
        assert_eq!(json!([]).kind(), "array");
        assert_eq!(json!({"a": 1}).kind(), "object");
        assert_eq!(json!(1.5).kind(), "number");
    }

    #[test]
    fn integers() {
        let int = |v: Value| match v {
            Value::Number(n) => integer(&n),
            _ => None,
        };
        assert_eq!(int(json!(u64::MAX)), Some(u64::MAX.into()));
        assert_eq!(int(json!(i64::MIN)), Some(i64::MIN.into()));
        assert_eq!(int(json!(86.0)), Some(86));
        assert_eq!(int(json!(-0.0)), Some(0));
        assert_eq!(int(json!(86.89)), None);
        assert_eq!(int(json!(1e300)), None);
    }
}
