use super::*;
use crate::cast::Collection;
use crate::encode::DynEncode;
use crate::policy::{CollectionPolicy, DefaultEmpty, Lossy, Strict};
use crate::Value;
use std::marker::PhantomData;

/// A collection of the base type, decoded with the context `R` resolves under the policy `P`.
///
/// The collection is anything implementing [`Collection`]: `Vec`, `VecDeque`, `BTreeSet` or
/// `HashSet`. A value that is not an array decodes as a one element collection.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// struct Count;
///
/// impl ConfigContextProvider for Count {
///     type Identified = u64;
///     const TOKEN: &'static str = "count";
/// }
///
/// let config = DecodeConfig::new().with_context("count", DecodingContext::<u64>::of::<u64>());
/// let value = serde_json::json!([1, -2, 3]);
///
/// assert!(value.decode_with::<StrictArray<ByProvider<Count>>>(&config).is_err());
///
/// let counts = value.decode_with::<DefaultArray<ByProvider<Count>>>(&config).unwrap();
/// assert!(counts.is_empty());
///
/// let counts = value.decode_with::<LossyArray<ByProvider<Count>>>(&config).unwrap();
/// assert_eq!(counts.value, vec![1, 3]);
///
/// let single = Value::from(5).decode_with::<StrictArray<ByProvider<Count>>>(&config).unwrap();
/// assert_eq!(single.value, vec![5]);
/// ```
pub struct DynamicCollection<R, C, P> {
    /// The decoded collection.
    pub value: C,
    marker: PhantomData<fn() -> (R, P)>,
}

/// A collection failing on the first element that does not decode.
pub type StrictCollection<R, C> = DynamicCollection<R, C, Strict>;
/// A collection that is empty if any element does not decode.
pub type DefaultCollection<R, C> = DynamicCollection<R, C, DefaultEmpty>;
/// A collection of the elements that decode.
pub type LossyCollection<R, C> = DynamicCollection<R, C, Lossy>;

/// A `Vec` failing on the first element that does not decode.
pub type StrictArray<R> = DynamicCollection<R, Vec<<R as Resolve>::Base>, Strict>;
/// A `Vec` that is empty if any element does not decode.
pub type DefaultArray<R> = DynamicCollection<R, Vec<<R as Resolve>::Base>, DefaultEmpty>;
/// A `Vec` of the elements that decode.
pub type LossyArray<R> = DynamicCollection<R, Vec<<R as Resolve>::Base>, Lossy>;

impl<R, C, P> DynamicCollection<R, C, P>
where
    R: Resolve,
    C: Collection<Element = R::Base>,
    P: CollectionPolicy,
{
    /// Wrap a collection that was not decoded.
    pub fn new(value: C) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }
}

wrapper_impls!(DynamicCollection<R, C, P>: C
    where R: Resolve, C: Collection<Element = R::Base>, P: CollectionPolicy);

impl<R, C, P> DynamicField for DynamicCollection<R, C, P>
where
    R: Resolve,
    C: Collection<Element = R::Base>,
    P: CollectionPolicy,
{
    type Base = R::Base;

    fn from_context(
        context: Result<DecodingContext<R::Base>>,
        decoder: Result<Decoder<'_>>,
    ) -> Result<Self> {
        let strict = || match (&context, &decoder) {
            (Ok(context), Ok(decoder)) => context.decode_array(decoder).map(C::from_elements),
            (_, Err(e)) | (Err(e), _) => Err(e.clone()),
        };

        let lossy = || match (&context, &decoder) {
            (Ok(context), Ok(decoder)) => C::from_elements(context.decode_lossy_array(decoder)),
            (_, Err(e)) | (Err(e), _) => {
                suppressed(e, "lossy collection left empty");
                C::default()
            }
        };

        P::CONFIG.recover(strict, lossy).map(Self::new)
    }
}

impl<R, C, P> Decode for DynamicCollection<R, C, P>
where
    R: Resolve,
    C: Collection<Element = R::Base>,
    P: CollectionPolicy,
{
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_resolved::<R, Self>(decoder)
    }
}

impl<R, C, P> Field for DynamicCollection<R, C, P>
where
    R: Resolve,
    C: Collection<Element = R::Base>,
    P: CollectionPolicy,
{
    fn decode_field<K: CodingKey>(container: &KeyedContainer<'_, K>, key: K) -> Result<Self> {
        decode_resolved_field::<R, Self, K>(container, key)
    }
}

impl<R, C, P> DynEncode for DynamicCollection<R, C, P>
where
    R: Resolve,
    C: Collection<Element = R::Base> + DynEncode,
    P: CollectionPolicy,
{
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.value.dyn_encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ByProvider, ConfigContextProvider};
    use crate::{DecodeConfig, ValueExt};
    use serde_json::json;
    use std::collections::BTreeSet;

    struct Small;

    impl ConfigContextProvider for Small {
        type Identified = u8;
        const TOKEN: &'static str = "small";
    }

    type Set<P> = DynamicCollection<ByProvider<Small>, BTreeSet<u8>, P>;

    crate::coding_keys! {
        enum Key { Items = "items", Missing = "missing" }
    }

    fn doc(items: Value) -> Value {
        json!({ "items": items })
    }

    fn config() -> DecodeConfig {
        DecodeConfig::new().with_context("small", DecodingContext::<u8>::of::<u8>())
    }

    #[test]
    fn policies_agree_on_valid_input() {
        let value = json!([3, 1, 3]);
        let config = config();

        let strict = value.decode_with::<Set<Strict>>(&config).unwrap();
        let default = value.decode_with::<Set<DefaultEmpty>>(&config).unwrap();
        let lossy = value.decode_with::<Set<Lossy>>(&config).unwrap();

        assert_eq!(strict.value, vec![1, 3].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(strict.value, default.value);
        assert_eq!(strict.value, lossy.value);
    }

    #[test]
    fn missing_field() {
        let value = doc(json!([1, null, 2]));
        let config = config();
        let c = Decoder::new(&value, &config).keyed::<Key>().unwrap();

        assert!(c.field::<StrictArray<ByProvider<Small>>>(Key::Missing).is_err());
        let default: DefaultArray<ByProvider<Small>> = c.field(Key::Missing).unwrap();
        assert!(default.is_empty());
        let lossy: LossyArray<ByProvider<Small>> = c.field(Key::Missing).unwrap();
        assert!(lossy.is_empty());

        let default: DefaultArray<ByProvider<Small>> = c.field(Key::Items).unwrap();
        assert!(default.is_empty());
        let lossy: LossyArray<ByProvider<Small>> = c.field(Key::Items).unwrap();
        assert_eq!(lossy.into_inner(), vec![1, 2]);
    }

    #[test]
    fn unresolved_context() {
        let value = json!([1]);
        let err = value.decode::<Set<Strict>>().unwrap_err();
        assert!(err.is_context_missing());
        assert!(value.decode::<Set<DefaultEmpty>>().unwrap().is_empty());
        assert!(value.decode::<Set<Lossy>>().unwrap().is_empty());
    }
}
