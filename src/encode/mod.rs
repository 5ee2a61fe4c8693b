//! Encoding typed values back into a [`Value`] tree.
//!
//! Two capabilities cover encoding:
//!
//! - [`Encode`] is the plain one, for types whose static type says everything.
//! - [`DynEncode`] is the dynamic one, for values known only through a base type such as
//!   `Box<dyn Post>`. It is object safe, so a trait object encodes as whatever concrete type it
//!   holds, and a sequence of trait objects becomes a heterogeneous array. It may also decline
//!   to produce anything, in which case the value is left out.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! use serde_json::json;
//!
//! trait Shape: DynEncode {}
//!
//! struct Circle(f64);
//! struct Label(String);
//!
//! impl DynEncode for Circle {
//!     fn dyn_encode(&self) -> Result<Option<Value>> {
//!         Ok(Some(json!({"radius": self.0})))
//!     }
//! }
//!
//! impl DynEncode for Label {
//!     fn dyn_encode(&self) -> Result<Option<Value>> {
//!         self.0.dyn_encode()
//!     }
//! }
//!
//! impl Shape for Circle {}
//! impl Shape for Label {}
//!
//! let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Circle(1.5)), Box::new(Label("a".into()))];
//! let value = Value::dyn_enc(&shapes).unwrap();
//! assert_eq!(value, json!([{"radius": 1.5}, "a"]));
//! ```
use crate::path::CodingKey;
use crate::{Map, Number, Result, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::marker::PhantomData;

/// Types that encode to a [`Value`].
pub trait Encode {
    /// Encode `self`.
    fn encode(&self) -> Result<Value>;
}

/// Types that encode as whatever they hold at run time.
///
/// `Ok(None)` means there is nothing to encode, and the value is omitted from its parent.
pub trait DynEncode {
    /// Encode `self`, if there is anything to encode.
    fn dyn_encode(&self) -> Result<Option<Value>>;
}

////////////////////////////// ENCODERS //////////////////////////////

/// Builds an object field by field, keyed by `K`.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// coding_keys! {
///     enum Key { Id = "id", Note = "note", Tags = "tags" }
/// }
///
/// let mut encoder = KeyedEncoder::new();
/// encoder.encode(Key::Id, &7u32).unwrap();
/// encoder.encode_dyn(Key::Note, &None::<String>).unwrap();
/// encoder.encode(Key::Tags, &vec!["a", "b"]).unwrap();
///
/// let value = encoder.finish();
/// assert_eq!(value.get("id"), Some(&Value::from(7u32)));
/// assert_eq!(value.get("note"), None);
/// assert_eq!(value.get("tags").and_then(Value::as_array).map(Vec::len), Some(2));
/// ```
pub struct KeyedEncoder<K> {
    fields: Map<String, Value>,
    key: PhantomData<fn(K)>,
}

impl<K: CodingKey> KeyedEncoder<K> {
    /// An empty object.
    pub fn new() -> Self {
        Self {
            fields: Map::new(),
            key: PhantomData,
        }
    }

    /// Encode `value` under `key`, replacing anything encoded there before.
    pub fn encode<T: Encode + ?Sized>(&mut self, key: K, value: &T) -> Result<()> {
        let value = value.encode()?;
        self.fields.insert(key.name().into_owned(), value);
        Ok(())
    }

    /// Encode `value` under `key` by its run time type. Nothing is written if there is nothing
    /// to encode.
    pub fn encode_dyn<T: DynEncode + ?Sized>(&mut self, key: K, value: &T) -> Result<()> {
        if let Some(value) = value.dyn_encode()? {
            self.fields.insert(key.name().into_owned(), value);
        }
        Ok(())
    }

    /// Encode `value` under `key` unless it is `None`.
    pub fn encode_opt<T: Encode>(&mut self, key: K, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    /// The object built so far.
    pub fn finish(self) -> Value {
        Value::Object(self.fields)
    }
}

impl<K: CodingKey> Default for KeyedEncoder<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an array element by element.
#[derive(Default)]
pub struct SeqEncoder {
    items: Vec<Value>,
}

impl SeqEncoder {
    /// An empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value`.
    pub fn push<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.encode()?);
        Ok(())
    }

    /// Append `value` by its run time type, if there is anything to encode.
    pub fn push_dyn<T: DynEncode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.extend(value.dyn_encode()?);
        Ok(())
    }

    /// The array built so far.
    pub fn finish(self) -> Value {
        Value::Array(self.items)
    }
}

////////////////////////////// PLAIN //////////////////////////////

macro_rules! encode_prims {
    ( $( $t:ty ),* ) => {
	$(
	impl Encode for $t {
	    fn encode(&self) -> Result<Value> {
		Ok(Value::from(self.clone()))
	    }
	}

	impl DynEncode for $t {
	    fn dyn_encode(&self) -> Result<Option<Value>> {
		self.encode().map(Some)
	    }
	}
	)*
    };
}

encode_prims!(
    bool, usize, u8, u16, u32, u64, isize, i8, i16, i32, i64, f32, f64, String, Number, Value
);

impl Encode for str {
    fn encode(&self) -> Result<Value> {
        Ok(Value::from(self))
    }
}

impl DynEncode for str {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.encode().map(Some)
    }
}

impl Encode for char {
    fn encode(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl DynEncode for char {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.encode().map(Some)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<Value> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Value::Null),
        }
    }
}

fn encode_seq<'a, T, I>(items: I) -> Result<Value>
where
    T: Encode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(Encode::encode)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn encode_map<'a, K, V, I>(entries: I) -> Result<Value>
where
    K: CodingKey,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| -> Result<(String, Value)> { Ok((k.name().into_owned(), v.encode()?)) })
        .collect::<Result<Map<String, Value>>>()
        .map(Value::Object)
}

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<Value> {
        encode_seq(self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Value> {
        encode_seq(self)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self) -> Result<Value> {
        encode_seq(self)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self) -> Result<Value> {
        encode_seq(self)
    }
}

impl<T: Encode> Encode for HashSet<T> {
    fn encode(&self) -> Result<Value> {
        encode_seq(self)
    }
}

impl<K: CodingKey, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self) -> Result<Value> {
        encode_map(self)
    }
}

impl<K: CodingKey, V: Encode> Encode for HashMap<K, V> {
    fn encode(&self) -> Result<Value> {
        encode_map(self)
    }
}

////////////////////////////// DYNAMIC //////////////////////////////

impl<T: DynEncode + ?Sized> DynEncode for &T {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        (**self).dyn_encode()
    }
}

impl<T: DynEncode + ?Sized> DynEncode for Box<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        (**self).dyn_encode()
    }
}

impl<T: DynEncode> DynEncode for Option<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        match self {
            Some(value) => value.dyn_encode(),
            None => Ok(None),
        }
    }
}

/// Each element by its own run time type. Elements with nothing to encode are left out.
fn dyn_encode_seq<'a, T, I>(items: I) -> Result<Option<Value>>
where
    T: DynEncode + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seq = SeqEncoder::new();
    for item in items {
        seq.push_dyn(item)?;
    }
    Ok(Some(seq.finish()))
}

fn dyn_encode_map<'a, K, V, I>(entries: I) -> Result<Option<Value>>
where
    K: CodingKey,
    V: DynEncode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut map = KeyedEncoder::new();
    for (key, value) in entries {
        map.encode_dyn(key.clone(), value)?;
    }
    Ok(Some(map.finish()))
}

impl<T: DynEncode> DynEncode for [T] {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_seq(self)
    }
}

impl<T: DynEncode> DynEncode for Vec<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_seq(self)
    }
}

impl<T: DynEncode> DynEncode for VecDeque<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_seq(self)
    }
}

impl<T: DynEncode> DynEncode for BTreeSet<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_seq(self)
    }
}

impl<T: DynEncode> DynEncode for HashSet<T> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_seq(self)
    }
}

impl<K: CodingKey, V: DynEncode> DynEncode for BTreeMap<K, V> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_map(self)
    }
}

impl<K: CodingKey, V: DynEncode> DynEncode for HashMap<K, V> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        dyn_encode_map(self)
    }
}
