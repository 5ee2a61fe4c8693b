use super::*;
use crate::encode::DynEncode;
use crate::Value;
use std::marker::PhantomData;

/// A single value of the base type, decoded with the context `R` resolves.
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
/// let value = Value::from(12);
///
/// let count = value.decode_with::<DynamicValue<ByProvider<Count>>>(&config).unwrap();
/// assert_eq!(*count, 12);
/// assert!(value.decode::<DynamicValue<ByProvider<Count>>>().is_err());
/// ```
pub struct DynamicValue<R: Resolve> {
    /// The decoded value.
    pub value: R::Base,
    marker: PhantomData<fn() -> R>,
}

impl<R: Resolve> DynamicValue<R> {
    /// Wrap a value that was not decoded.
    pub fn new(value: R::Base) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }
}

wrapper_impls!(DynamicValue<R>: R::Base where R: Resolve);

impl<R: Resolve> DynamicField for DynamicValue<R> {
    type Base = R::Base;

    fn from_context(
        context: Result<DecodingContext<R::Base>>,
        decoder: Result<Decoder<'_>>,
    ) -> Result<Self> {
        let decoder = decoder?;
        context?.decode(&decoder).map(Self::new)
    }
}

impl<R: Resolve> Decode for DynamicValue<R> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_resolved::<R, Self>(decoder)
    }
}

impl<R: Resolve> Field for DynamicValue<R> {
    fn decode_field<K: CodingKey>(container: &KeyedContainer<'_, K>, key: K) -> Result<Self> {
        decode_resolved_field::<R, Self, K>(container, key)
    }
}

impl<R: Resolve> DynEncode for DynamicValue<R>
where
    R::Base: DynEncode,
{
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.value.dyn_encode()
    }
}

/// A single value that falls back to `V::default()` when anything goes wrong: the context does
/// not resolve, the key is missing, or the value does not decode.
pub struct DefaultDynamic<R, V> {
    /// The decoded or default value.
    pub value: V,
    marker: PhantomData<fn() -> R>,
}

/// A single value that is `None` when it cannot be decoded.
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
///
/// let count = Value::from(12).decode_with::<OptionalDynamic<ByProvider<Count>>>(&config);
/// assert_eq!(count.unwrap().value, Some(12));
///
/// let count = Value::from(-1).decode_with::<OptionalDynamic<ByProvider<Count>>>(&config);
/// assert_eq!(count.unwrap().value, None);
/// ```
pub type OptionalDynamic<R> = DefaultDynamic<R, Option<<R as Resolve>::Base>>;

impl<R, V> DefaultDynamic<R, V>
where
    R: Resolve,
    V: Default + From<R::Base>,
{
    /// Wrap a value that was not decoded.
    pub fn new(value: V) -> Self {
        Self {
            value,
            marker: PhantomData,
        }
    }
}

wrapper_impls!(DefaultDynamic<R, V>: V where R: Resolve, V: Default + From<R::Base>);

impl<R, V> DynamicField for DefaultDynamic<R, V>
where
    R: Resolve,
    V: Default + From<R::Base>,
{
    type Base = R::Base;

    fn from_context(
        context: Result<DecodingContext<R::Base>>,
        decoder: Result<Decoder<'_>>,
    ) -> Result<Self> {
        FailConfig::DefaultEmpty
            .recover(
                || context?.decode(&decoder?).map(V::from),
                V::default,
            )
            .map(Self::new)
    }
}

impl<R, V> Decode for DefaultDynamic<R, V>
where
    R: Resolve,
    V: Default + From<R::Base>,
{
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_resolved::<R, Self>(decoder)
    }
}

impl<R, V> Field for DefaultDynamic<R, V>
where
    R: Resolve,
    V: Default + From<R::Base>,
{
    fn decode_field<K: CodingKey>(container: &KeyedContainer<'_, K>, key: K) -> Result<Self> {
        decode_resolved_field::<R, Self, K>(container, key)
    }
}

impl<R, V> DynEncode for DefaultDynamic<R, V>
where
    R: Resolve,
    V: Default + From<R::Base> + DynEncode,
{
    fn dyn_encode(&self) -> Result<Option<Value>> {
        self.value.dyn_encode()
    }
}
