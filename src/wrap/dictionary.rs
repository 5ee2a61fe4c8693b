use super::*;
use crate::cast::Collection;
use crate::encode::DynEncode;
use crate::policy::CollectionPolicy;
use crate::provider::ContainerCodingKey;
use crate::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// An object whose keys are the discriminators of their values.
///
/// Each key of type `K` found in the object resolves its own context through
/// [`ContainerCodingKey::contained_context`]. Keys `K` does not know are ignored.
///
/// Under `DefaultEmpty` the dictionary is all or nothing: one failing entry empties it. Under
/// `Lossy` failing entries are dropped one by one.
pub struct DynamicDictionary<K: ContainerCodingKey, P> {
    /// The decoded entries.
    pub value: BTreeMap<K, K::Contained>,
    marker: PhantomData<fn() -> P>,
}

impl<K: ContainerCodingKey, P: CollectionPolicy> DynamicDictionary<K, P> {
    /// Wrap entries that were not decoded.
    pub fn new(value: BTreeMap<K, K::Contained>) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }
}

wrapper_impls!(DynamicDictionary<K, P>: BTreeMap<K, K::Contained>
    where K: ContainerCodingKey, P: CollectionPolicy);

impl<K: ContainerCodingKey, P: CollectionPolicy> Decode for DynamicDictionary<K, P> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let entry = |key: &K, d: &Decoder<'_>| key.contained_context().decode(d);

        P::CONFIG
            .recover(
                || strict_entries(decoder, entry),
                || lossy_entries(decoder, entry),
            )
            .map(Self::new)
    }
}

impl<K: ContainerCodingKey, P: CollectionPolicy> Field for DynamicDictionary<K, P> {
    fn decode_field<F: CodingKey>(container: &KeyedContainer<'_, F>, key: F) -> Result<Self> {
        match container.nested(key) {
            Ok(decoder) => Self::decode(&decoder),
            Err(e) => absent(P::CONFIG, e).map(Self::new),
        }
    }
}

impl<K, P> DynEncode for DynamicDictionary<K, P>
where
    K: ContainerCodingKey,
    K::Contained: DynEncode,
    P: CollectionPolicy,
{
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.value.dyn_encode()
    }
}

/// An object whose keys are the discriminators of the collections they hold.
///
/// Every element of the collection under a key decodes with that key's context. The policy `P`
/// applies within each collection as well as across the dictionary:
///
/// - `Strict` fails on the first element that does not decode.
/// - `DefaultEmpty` empties the whole dictionary if any element does not decode.
/// - `Lossy` skips elements that do not decode, and omits keys left with nothing.
pub struct DynamicCollectionDictionary<K, C, P> {
    /// The decoded entries.
    pub value: BTreeMap<K, C>,
    marker: PhantomData<fn() -> P>,
}

impl<K, C, P> DynamicCollectionDictionary<K, C, P>
where
    K: ContainerCodingKey,
    C: Collection<Element = K::Contained>,
    P: CollectionPolicy,
{
    /// Wrap entries that were not decoded.
    pub fn new(value: BTreeMap<K, C>) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }
}

wrapper_impls!(DynamicCollectionDictionary<K, C, P>: BTreeMap<K, C>
    where K: ContainerCodingKey, C: Collection<Element = K::Contained>, P: CollectionPolicy);

impl<K, C, P> Decode for DynamicCollectionDictionary<K, C, P>
where
    K: ContainerCodingKey,
    C: Collection<Element = K::Contained>,
    P: CollectionPolicy,
{
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let strict = || {
            strict_entries(decoder, |key: &K, d| {
                key.contained_context().decode_array(d).map(C::from_elements)
            })
        };

        let lossy = || {
            let mut entries = lossy_entries(decoder, |key: &K, d| {
                Ok(C::from_elements(key.contained_context().decode_lossy_array(d)))
            });
            entries.retain(|key, collection: &mut C| {
                let keep = !collection.is_empty();
                if !keep {
                    log::debug!("omitting `{}` of {}: nothing decoded", key.name(), decoder.path());
                }
                keep
            });
            entries
        };

        P::CONFIG.recover(strict, lossy).map(Self::new)
    }
}

impl<K, C, P> Field for DynamicCollectionDictionary<K, C, P>
where
    K: ContainerCodingKey,
    C: Collection<Element = K::Contained>,
    P: CollectionPolicy,
{
    fn decode_field<F: CodingKey>(container: &KeyedContainer<'_, F>, key: F) -> Result<Self> {
        match container.nested(key) {
            Ok(decoder) => Self::decode(&decoder),
            Err(e) => absent(P::CONFIG, e).map(Self::new),
        }
    }
}

impl<K, C, P> DynEncode for DynamicCollectionDictionary<K, C, P>
where
    K: ContainerCodingKey,
    C: Collection<Element = K::Contained> + DynEncode,
    P: CollectionPolicy,
{
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.value.dyn_encode()
    }
}

/// Every recognized entry decoded with `entry`, or the first failure.
fn strict_entries<K, V, F>(decoder: &Decoder<'_>, entry: F) -> Result<BTreeMap<K, V>>
where
    K: CodingKey + Ord,
    F: Fn(&K, &Decoder<'_>) -> Result<V>,
{
    let container = decoder.keyed::<K>()?;
    container
        .all_keys()
        .into_iter()
        .map(|key| -> Result<(K, V)> {
            let value = entry(&key, &container.nested(key.clone())?)?;
            Ok((key, value))
        })
        .collect()
}

/// The recognized entries that decode with `entry`.
fn lossy_entries<K, V, F>(decoder: &Decoder<'_>, entry: F) -> BTreeMap<K, V>
where
    K: CodingKey + Ord,
    F: Fn(&K, &Decoder<'_>) -> Result<V>,
{
    let container = match decoder.keyed::<K>() {
        Ok(container) => container,
        Err(e) => {
            suppressed(&e, "lossy dictionary left empty");
            return BTreeMap::new();
        }
    };

    container
        .all_keys()
        .into_iter()
        .filter_map(|key| {
            match container.nested(key.clone()).and_then(|d| entry(&key, &d)) {
                Ok(value) => Some((key, value)),
                Err(e) => {
                    log::debug!("skipping entry `{}` of {}: {}", key.name(), decoder.path(), e);
                    None
                }
            }
        })
        .collect()
}
