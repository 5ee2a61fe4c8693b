//! Field holders that decode through a resolved context.
//!
//! Each wrapper holds a public `value` and glues three pieces together for one struct field:
//! how the context is resolved (a [`Resolve`](crate::Resolve) type), which context operation
//! the value's shape needs (single, array, dictionary), and what to do on failure (a
//! [`CollectionPolicy`](crate::CollectionPolicy) tag).
//!
//! | Wrapper | Holds | Fails |
//! | --- | --- | --- |
//! | [`DynamicValue<R>`] | `Base` | always propagates |
//! | [`DefaultDynamic<R, V>`], [`OptionalDynamic<R>`] | `V`, `Option<Base>` | never, yields `V::default()` |
//! | [`DynamicCollection<R, C, P>`] | any [`Collection`](crate::Collection) of `Base` | per policy |
//! | [`DynamicDictionary<K, P>`] | `BTreeMap<K, Base>` | per policy |
//! | [`DynamicCollectionDictionary<K, C, P>`] | `BTreeMap<K, C>` | per policy |
//! | [`PathKey<K>`] | the first `K` in the coding path | always propagates |
//! | [`DefaultPathKey<K, V>`], [`OptionalPathKey<K>`] | `V`, `Option<K>` | never |
//!
//! Wrappers are decoded like any other value, either standalone through [`Decode`] or from a
//! parent container with [`KeyedContainer::field`]. Wrappers that resolve a context also
//! implement [`DynamicField`], which lets [`KeyedContainer::dynamic`] hand them a context
//! resolved from a sibling discriminator.
//!
//! Every wrapper encodes its value through [`DynEncode`](crate::DynEncode).
use crate::decode::{Decode, Decoder, KeyedContainer};
use crate::path::CodingKey;
use crate::policy::{suppressed, FailConfig};
use crate::provider::Resolve;
use crate::{DecodingContext, Error, Result};

mod collection;
mod dictionary;
mod path;
mod value;

pub use collection::{
    DefaultArray, DefaultCollection, DynamicCollection, LossyArray, LossyCollection, StrictArray,
    StrictCollection,
};
pub use dictionary::{DynamicCollectionDictionary, DynamicDictionary};
pub use path::{DefaultPathKey, OptionalPathKey, PathKey};
pub use value::{DefaultDynamic, DynamicValue, OptionalDynamic};

/// A value decoded from a field of a keyed container.
///
/// Unlike [`Decode`], the implementation is told about the field, so wrappers with a
/// recovering policy can turn a missing key into their default value.
pub trait Field: Sized {
    /// Decode the field `key` of `container`.
    fn decode_field<K: CodingKey>(container: &KeyedContainer<'_, K>, key: K) -> Result<Self>;
}

/// A wrapper that decodes with a context handed to it.
///
/// Both arguments arrive unchecked so the wrapper's policy decides what a failure to resolve
/// the context, or to find the value, turns into.
pub trait DynamicField: Sized {
    /// The base type of the context the wrapper needs.
    type Base: 'static;

    /// Decode from `decoder` with `context`.
    fn from_context(
        context: Result<DecodingContext<Self::Base>>,
        decoder: Result<Decoder<'_>>,
    ) -> Result<Self>;
}

/// Decode `W` at `decoder`, resolving the context there.
pub(crate) fn decode_resolved<R, W>(decoder: &Decoder<'_>) -> Result<W>
where
    R: Resolve,
    W: DynamicField<Base = R::Base>,
{
    W::from_context(R::resolve(decoder), Ok(decoder.clone()))
}

/// Decode `W` from the field `key`, resolving the context at the field.
pub(crate) fn decode_resolved_field<R, W, K>(container: &KeyedContainer<'_, K>, key: K) -> Result<W>
where
    R: Resolve,
    W: DynamicField<Base = R::Base>,
    K: CodingKey,
{
    match container.nested(key) {
        Ok(decoder) => W::from_context(R::resolve(&decoder), Ok(decoder)),
        Err(e) => W::from_context(Err(e.clone()), Err(e)),
    }
}

/// Apply `config` to a field that could not be found.
pub(crate) fn absent<T: Default>(config: FailConfig, error: Error) -> Result<T> {
    config.recover(
        || Err(error.clone()),
        || {
            suppressed(&error, "field absent, using empty value");
            T::default()
        },
    )
}

/// Implements the accessors shared by every wrapper: `into_inner`, `Deref`, `DerefMut`,
/// `Debug`, `Clone` and `PartialEq`. The wrapper must hold `value` and provide `new`.
macro_rules! wrapper_impls {
    ($name:ident<$($g:ident),+>: $target:ty where $($bounds:tt)+) => {
        impl<$($g),+> $name<$($g),+>
        where
            $($bounds)+
        {
            /// Unwrap the held value.
            pub fn into_inner(self) -> $target {
                self.value
            }
        }

        impl<$($g),+> ::std::ops::Deref for $name<$($g),+>
        where
            $($bounds)+
        {
            type Target = $target;

            fn deref(&self) -> &Self::Target {
                &self.value
            }
        }

        impl<$($g),+> ::std::ops::DerefMut for $name<$($g),+>
        where
            $($bounds)+
        {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.value
            }
        }

        impl<$($g),+> ::std::fmt::Debug for $name<$($g),+>
        where
            $($bounds)+,
            $target: ::std::fmt::Debug,
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.value).finish()
            }
        }

        impl<$($g),+> Clone for $name<$($g),+>
        where
            $($bounds)+,
            $target: Clone,
        {
            fn clone(&self) -> Self {
                Self::new(self.value.clone())
            }
        }

        impl<$($g),+> PartialEq for $name<$($g),+>
        where
            $($bounds)+,
            $target: PartialEq,
        {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }
    };
}

use wrapper_impls;
