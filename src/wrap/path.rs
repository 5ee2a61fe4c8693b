use super::*;
use crate::encode::DynEncode;
use crate::path::CodingPath;
use crate::{Map, Value};
use std::marker::PhantomData;

/// The first key of type `K` in the coding path, used as a discriminator supplied by an
/// ancestor.
///
/// Decoded from a parent container, the path searched is the container's own. Decoded
/// standalone, it is the decoder's path. Nothing is read from the document.
///
/// A path key has no persisted form and encodes as an empty object.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// coding_keys! {
///     enum Section { News = "news", Sport = "sport" }
/// }
///
/// coding_keys! {
///     enum ArticleKey { Title = "title", Section = "section" }
/// }
///
/// struct Article {
///     title: String,
///     section: PathKey<Section>,
/// }
///
/// impl Decode for Article {
///     fn decode(decoder: &Decoder<'_>) -> Result<Self> {
///         let c = decoder.keyed::<ArticleKey>()?;
///         Ok(Article {
///             title: c.decode(ArticleKey::Title)?,
///             section: c.field(ArticleKey::Section)?,
///         })
///     }
/// }
///
/// let article = serde_json::json!({"title": "Final score"});
/// let value = serde_json::json!({"sport": [article.clone()]});
///
/// let pages = value.decode::<std::collections::BTreeMap<Section, Vec<Article>>>().unwrap();
/// assert_eq!(*pages[&Section::Sport][0].section, Section::Sport);
///
/// // standalone there is no ancestor to read
/// assert!(article.decode::<Article>().is_err());
/// ```
pub struct PathKey<K> {
    /// The resolved key.
    pub value: K,
}

impl<K: CodingKey> PathKey<K> {
    /// Wrap a key that was not resolved.
    pub fn new(value: K) -> Self {
        Self { value }
    }
}

wrapper_impls!(PathKey<K>: K where K: CodingKey);

impl<K: CodingKey> Decode for PathKey<K> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.key_from_path().map(Self::new)
    }
}

impl<K: CodingKey> Field for PathKey<K> {
    fn decode_field<F: CodingKey>(container: &KeyedContainer<'_, F>, _: F) -> Result<Self> {
        container.path().resolve().map(Self::new)
    }
}

impl<K: CodingKey> DynEncode for PathKey<K> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        Ok(Some(Value::Object(Map::new())))
    }
}

/// A path key that is `V::default()` when no key of type `K` is in the path.
pub struct DefaultPathKey<K, V> {
    /// The resolved or default key.
    pub value: V,
    marker: PhantomData<fn() -> K>,
}

/// A path key that is `None` when no key of type `K` is in the path.
pub type OptionalPathKey<K> = DefaultPathKey<K, Option<K>>;

impl<K: CodingKey, V: Default + From<K>> DefaultPathKey<K, V> {
    /// Wrap a key that was not resolved.
    pub fn new(value: V) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }

    fn from_path(path: &CodingPath) -> Self {
        let value = path.find::<K>().map(V::from).unwrap_or_else(|| {
            log::debug!("no path key at {}, using default", path);
            V::default()
        });
        Self::new(value)
    }
}

wrapper_impls!(DefaultPathKey<K, V>: V where K: CodingKey, V: Default + From<K>);

impl<K: CodingKey, V: Default + From<K>> Decode for DefaultPathKey<K, V> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(Self::from_path(decoder.path()))
    }
}

impl<K: CodingKey, V: Default + From<K>> Field for DefaultPathKey<K, V> {
    fn decode_field<F: CodingKey>(container: &KeyedContainer<'_, F>, _: F) -> Result<Self> {
        Ok(Self::from_path(container.path()))
    }
}

impl<K: CodingKey, V: Default + From<K>> DynEncode for DefaultPathKey<K, V> {
    fn dyn_encode(&self) -> Result<Option<Value>> {
        Ok(Some(Value::Object(Map::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{AnyKey, SeqIndex};
    use crate::DecodeConfig;
    use serde_json::json;

    crate::coding_keys! {
        enum Level { Low = "low", High = "high" }
    }

    #[test]
    fn nearest_from_root() {
        let value = Value::Null;
        let config = DecodeConfig::default();
        let decoder = Decoder::new(&value, &config);

        let optional: OptionalPathKey<Level> = decoder.decode().unwrap();
        assert_eq!(optional.value, None);
        assert!(decoder.decode::<PathKey<Level>>().is_err());

        let nested = json!({"high": [{"low": null}]});
        let high = decoder.child(AnyKey::new(&Level::High), &nested);
        let deep = high
            .child(AnyKey::new(&SeqIndex(0)), &nested)
            .child(AnyKey::new(&Level::Low), &nested);

        assert_eq!(deep.decode::<PathKey<Level>>().unwrap().into_inner(), Level::High);
        assert_eq!(deep.decode::<OptionalPathKey<Level>>().unwrap().value, Some(Level::High));
    }

    #[test]
    fn encodes_placeholder() {
        let key = PathKey::new(Level::Low);
        assert_eq!(key.dyn_encode(), Ok(Some(json!({}))));
        assert_eq!(
            OptionalPathKey::<Level>::new(None).dyn_encode(),
            Ok(Some(json!({})))
        );
    }
}
