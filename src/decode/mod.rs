//! Reading typed values out of a [`Value`] tree.
//!
//! A [`Decoder`] is a cursor positioned at one node of the document. It knows the
//! [`CodingPath`] that led to the node and carries the [`DecodeConfig`] of the whole decode
//! operation. Types implement [`Decode`] by opening containers on the decoder and reading their
//! fields.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! coding_keys! {
//!     enum PointKey { X = "x", Y = "y", Label = "label" }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: Option<String>,
//! }
//!
//! impl Decode for Point {
//!     fn decode(decoder: &Decoder<'_>) -> Result<Self> {
//!         let c = decoder.keyed::<PointKey>()?;
//!         Ok(Point {
//!             x: c.decode(PointKey::X)?,
//!             y: c.decode(PointKey::Y)?,
//!             label: c.decode_opt(PointKey::Label)?,
//!         })
//!     }
//! }
//!
//! let value = serde_json::json!({"x": 1, "y": -2});
//! assert_eq!(value.decode::<Point>(), Ok(Point { x: 1, y: -2, label: None }));
//! ```
use crate::path::{AnyKey, CodingKey, CodingPath};
use crate::{Error, Result, Value, ValueExt};
use std::any::type_name;
use std::fmt;

mod config;
mod container;
mod impls;

pub use config::DecodeConfig;
pub use container::{KeyedContainer, SeqContainer};

/// Types that can be decoded from a document node.
pub trait Decode: Sized {
    /// Decode `Self` from the node the decoder points at.
    fn decode(decoder: &Decoder<'_>) -> Result<Self>;
}

/// A cursor at one node of a document.
///
/// Cloning is cheap relative to decoding, and sub-decoders never alias their parent's state: a
/// decoder is only ever read.
#[derive(Clone)]
pub struct Decoder<'d> {
    value: &'d Value,
    path: CodingPath,
    config: &'d DecodeConfig,
}

impl<'d> Decoder<'d> {
    /// A decoder at the root of `value`.
    pub fn new(value: &'d Value, config: &'d DecodeConfig) -> Self {
        Self {
            value,
            path: CodingPath::new(),
            config,
        }
    }

    /// The node under the cursor.
    pub fn value(&self) -> &'d Value {
        self.value
    }

    /// The keys leading to this node.
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// The side-channel configuration of this decode operation.
    pub fn config(&self) -> &'d DecodeConfig {
        self.config
    }

    /// Open the node as an object whose keys are enumerated by `K`.
    pub fn keyed<K: CodingKey>(&self) -> Result<KeyedContainer<'d, K>> {
        match self.value {
            Value::Object(fields) => Ok(KeyedContainer::new(self.clone(), fields)),
            _ => Err(self.invalid_type("object")),
        }
    }

    /// Open the node as an array.
    pub fn seq(&self) -> Result<SeqContainer<'d>> {
        match self.value {
            Value::Array(items) => Ok(SeqContainer::new(self.clone(), items)),
            _ => Err(self.invalid_type("array")),
        }
    }

    /// Decode the node as `T`.
    pub fn decode<T: Decode>(&self) -> Result<T> {
        T::decode(self)
    }

    /// The first key of type `K` in the path leading to this node.
    pub fn key_from_path<K: CodingKey>(&self) -> Result<K> {
        self.path.resolve()
    }

    /// An [`Error::InvalidType`] for the node under the cursor.
    pub fn invalid_type(&self, expected: &'static str) -> Error {
        Error::InvalidType {
            expected,
            found: self.value.kind(),
            path: self.path.to_string(),
        }
    }

    /// An [`Error::TypeMismatch`] naming `T`.
    pub fn type_mismatch<T: ?Sized>(&self) -> Error {
        Error::TypeMismatch {
            expected: type_name::<T>(),
            path: self.path.to_string(),
        }
    }

    /// A free form error at this node.
    pub fn error<T: fmt::Display>(&self, message: T) -> Error {
        Error::message(message, &self.path)
    }

    pub(crate) fn child(&self, key: AnyKey, value: &'d Value) -> Decoder<'d> {
        Decoder {
            value,
            path: self.path.child(key),
            config: self.config,
        }
    }
}

impl<'d> fmt::Debug for Decoder<'d> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("path", &self.path)
            .field("kind", &self.value.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_node_kind() {
        let value = json!(3);
        let config = DecodeConfig::default();
        let decoder = Decoder::new(&value, &config);

        assert_eq!(
            decoder.keyed::<String>().map(|_| ()),
            Err(Error::InvalidType {
                expected: "object",
                found: "number",
                path: "<root>".into()
            })
        );
        assert!(decoder.seq().is_err());
        assert_eq!(decoder.decode::<u8>(), Ok(3));
    }

    #[test]
    fn child_paths() {
        let value = json!({"list": [null, {"deep": true}]});
        let config = DecodeConfig::default();
        let decoder = Decoder::new(&value, &config);

        let list = decoder.keyed::<String>().unwrap().nested("list".into()).unwrap();
        let mut seq = list.seq().unwrap();
        assert!(seq.skip());
        let element = seq.next_decoder().unwrap();
        let deep = element
            .keyed::<String>()
            .unwrap()
            .nested("deep".into())
            .unwrap();

        assert_eq!(deep.path().to_string(), "list.1.deep");
        assert_eq!(deep.decode::<bool>(), Ok(true));
        assert_eq!(
            deep.key_from_path::<crate::SeqIndex>(),
            Ok(crate::SeqIndex(1))
        );
    }
}
