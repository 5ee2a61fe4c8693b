use super::*;
use crate::Map;
use crate::path::SeqIndex;
use crate::provider::ContextCodingKey;
use crate::wrap::{DynamicField, Field};
use std::marker::PhantomData;

/// An object opened with the key type `K`.
pub struct KeyedContainer<'d, K> {
    decoder: Decoder<'d>,
    fields: &'d Map<String, Value>,
    key: PhantomData<fn() -> K>,
}

impl<'d, K: CodingKey> KeyedContainer<'d, K> {
    pub(super) fn new(decoder: Decoder<'d>, fields: &'d Map<String, Value>) -> Self {
        Self {
            decoder,
            fields,
            key: PhantomData,
        }
    }

    /// The decoder of the object itself.
    pub fn decoder(&self) -> &Decoder<'d> {
        &self.decoder
    }

    /// The path of the object itself.
    pub fn path(&self) -> &CodingPath {
        self.decoder.path()
    }

    /// Every key in the object that `K` recognizes, in key order.
    pub fn all_keys(&self) -> Vec<K> {
        self.fields.keys().filter_map(|k| K::from_name(k)).collect()
    }

    /// The object holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.fields.contains_key(key.name().as_ref())
    }

    /// A decoder for the value under `key`.
    pub fn nested(&self, key: K) -> Result<Decoder<'d>> {
        let name = key.name();
        match self.fields.get(name.as_ref()) {
            Some(value) => Ok(self.decoder.child(AnyKey::new(&key), value)),
            None => Err(Error::KeyNotFound {
                key: name.into_owned(),
                path: self.path().to_string(),
            }),
        }
    }

    /// Decode the value under `key`.
    pub fn decode<T: Decode>(&self, key: K) -> Result<T> {
        self.nested(key)?.decode()
    }

    /// Decode the value under `key`, returning `None` if the key is absent or `null`.
    pub fn decode_opt<T: Decode>(&self, key: K) -> Result<Option<T>> {
        let present = matches!(self.fields.get(key.name().as_ref()), Some(v) if !v.is_null());
        if present {
            self.decode(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Decode a wrapper field stored under `key`.
    ///
    /// The wrapper resolves its own decoding context. Wrappers with a non-throwing policy turn a
    /// missing key into their default value.
    pub fn field<W: Field>(&self, key: K) -> Result<W> {
        W::decode_field(self, key)
    }
}

impl<'d, K: ContextCodingKey> KeyedContainer<'d, K> {
    /// Decode a wrapper stored under `key`, whose context is resolved from _this_ container.
    ///
    /// This is how a sibling discriminator is used: the key type names the field holding the
    /// discriminator, and the value is decoded from another field of the same object.
    pub fn dynamic<W>(&self, key: K) -> Result<W>
    where
        W: DynamicField<Base = K::Identified>,
    {
        log::trace!("resolving sibling context for `{}` at {}", key.name(), self.path());
        W::from_context(K::context(self), self.nested(key))
    }
}

/// An array opened for sequential reading.
///
/// The container keeps a cursor over the elements. Reading an element only moves the cursor when
/// the read succeeds, except for [`next_decoder`](Self::next_decoder) and
/// [`skip`](Self::skip), which always move it.
pub struct SeqContainer<'d> {
    decoder: Decoder<'d>,
    items: &'d [Value],
    index: usize,
}

impl<'d> SeqContainer<'d> {
    pub(super) fn new(decoder: Decoder<'d>, items: &'d [Value]) -> Self {
        Self {
            decoder,
            items,
            index: 0,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The position of the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cursor has passed the last element.
    pub fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    /// The path of the array itself.
    pub fn path(&self) -> &CodingPath {
        self.decoder.path()
    }

    fn current(&self) -> Result<Decoder<'d>> {
        match self.items.get(self.index) {
            Some(value) => Ok(self
                .decoder
                .child(AnyKey::new(&SeqIndex(self.index)), value)),
            None => Err(self.decoder.error(format!(
                "array is at end, all {} elements read",
                self.items.len()
            ))),
        }
    }

    /// A decoder for the element under the cursor. The cursor moves on.
    pub fn next_decoder(&mut self) -> Result<Decoder<'d>> {
        let decoder = self.current()?;
        self.index += 1;
        Ok(decoder)
    }

    /// Decode the element under the cursor, moving on only if it decodes.
    pub fn decode_next<T: Decode>(&mut self) -> Result<T> {
        self.decode_next_with(T::decode)
    }

    /// Decode the element under the cursor with `f`, moving on only if it succeeds.
    pub fn decode_next_with<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Decoder<'d>) -> Result<T>,
    {
        let value = f(&self.current()?)?;
        self.index += 1;
        Ok(value)
    }

    /// Move past the element under the cursor without decoding it, however deeply nested it is.
    ///
    /// Returns `false` if the cursor was already at the end.
    pub fn skip(&mut self) -> bool {
        if self.is_at_end() {
            false
        } else {
            self.index += 1;
            true
        }
    }

    /// Decode the element under the cursor with `f`. A failing element is skipped and `None`
    /// returned, so the cursor always ends up on the next element.
    pub fn lossy_next<T, F>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(&Decoder<'d>) -> Result<T>,
    {
        match self.decode_next_with(f) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("skipping element {} of {}: {}", self.index, self.path(), e);
                self.skip();
                None
            }
        }
    }
}
