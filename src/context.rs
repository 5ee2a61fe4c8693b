//! The bundle of decode routines a discriminator resolves to.
//!
//! A [`DecodingContext<B>`] closes over a concrete type and offers the three ways a field may
//! need to decode it: a single value, a strict array, and a lossy array that skips malformed
//! elements. All three are built from the same element routine, so they always agree about
//! which concrete type an input maps to.
//!
//! Contexts are immutable and cheap to clone. They are `Send` and `Sync`, which lets one
//! context be built once and shared through a [`DecodeConfig`](crate::DecodeConfig).
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! let context = DecodingContext::<u8>::of::<u8>();
//! let value = serde_json::json!([1, "two", 3]);
//! let config = DecodeConfig::new();
//! let decoder = Decoder::new(&value, &config);
//!
//! assert!(context.decode_array(&decoder).is_err());
//! assert_eq!(context.decode_lossy_array(&decoder), vec![1, 3]);
//! ```
use crate::cast::{cast, cast_each, cast_optional, DynCast};
use crate::decode::{Decode, Decoder};
use crate::provider::ContextCodingKey;
use crate::Result;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

type OneFn<B> = dyn Fn(&Decoder<'_>) -> Result<B> + Send + Sync;
type ArrayFn<B> = dyn Fn(&Decoder<'_>) -> Result<Vec<B>> + Send + Sync;
type LossyFn<B> = dyn Fn(&Decoder<'_>) -> Vec<B> + Send + Sync;

/// Decode routines resolved for the base type `B`.
pub struct DecodingContext<B> {
    one: Arc<OneFn<B>>,
    array: Arc<ArrayFn<B>>,
    lossy: Arc<LossyFn<B>>,
}

impl<B: 'static> DecodingContext<B> {
    /// Build a context from its three routines.
    ///
    /// The routines must agree with each other. Prefer [`of`](Self::of),
    /// [`with_fallback`](Self::with_fallback) or [`keyed`](Self::keyed), which derive all three
    /// from one element routine.
    pub fn from_fns<O, A, L>(one: O, array: A, lossy: L) -> Self
    where
        O: Fn(&Decoder<'_>) -> Result<B> + Send + Sync + 'static,
        A: Fn(&Decoder<'_>) -> Result<Vec<B>> + Send + Sync + 'static,
        L: Fn(&Decoder<'_>) -> Vec<B> + Send + Sync + 'static,
    {
        Self {
            one: Arc::new(one),
            array: Arc::new(array),
            lossy: Arc::new(lossy),
        }
    }

    /// The context that decodes `T` and casts it to `B`.
    ///
    /// A value that is not an array is accepted by the array routines as a one element array.
    pub fn of<T>() -> Self
    where
        T: Decode + DynCast<B> + 'static,
    {
        Self::from_fns(
            |d| cast(T::decode(d)?, d.path()),
            |d| cast_each(strict_elements(d, T::decode)?, d.path()),
            |d| {
                lossy_elements(d, T::decode)
                    .into_iter()
                    .filter_map(cast_optional)
                    .collect()
            },
        )
    }

    /// The context that decodes `T`, and `F` wherever `T` fails.
    ///
    /// # Example
    /// ```rust
    /// # use dynserd::*;
    /// #[derive(Debug, PartialEq)]
    /// enum Scalar {
    ///     Int(i64),
    ///     Text(String),
    /// }
    ///
    /// impl DynCast<Scalar> for i64 {
    ///     fn dyn_cast(self) -> std::result::Result<Scalar, Self> {
    ///         Ok(Scalar::Int(self))
    ///     }
    /// }
    ///
    /// impl DynCast<Scalar> for String {
    ///     fn dyn_cast(self) -> std::result::Result<Scalar, Self> {
    ///         Ok(Scalar::Text(self))
    ///     }
    /// }
    ///
    /// let context = DecodingContext::<Scalar>::with_fallback::<i64, String>();
    /// let config = DecodeConfig::new();
    ///
    /// let value = Value::from("86");
    /// let decoder = Decoder::new(&value, &config);
    /// assert_eq!(context.decode(&decoder), Ok(Scalar::Text("86".into())));
    ///
    /// let value = Value::from(86.89);
    /// let decoder = Decoder::new(&value, &config);
    /// assert!(context.decode(&decoder).is_err());
    /// ```
    pub fn with_fallback<T, F>() -> Self
    where
        T: Decode + DynCast<B> + 'static,
        F: Decode + DynCast<B> + 'static,
    {
        Self::of::<T>().or(Self::of::<F>())
    }

    /// Combine with a `fallback` context.
    ///
    /// The single value and strict array routines retry the whole operation with `fallback` when
    /// this context fails. The lossy routine tries the fallback per element before skipping it.
    pub fn or(self, fallback: DecodingContext<B>) -> Self {
        let (primary, secondary) = (self.clone(), fallback.clone());
        let one = move |d: &Decoder<'_>| {
            primary.decode(d).or_else(|e| {
                log::trace!("primary decode failed at {}, trying fallback: {}", d.path(), e);
                secondary.decode(d)
            })
        };

        let (primary, secondary) = (self.clone(), fallback.clone());
        let array = move |d: &Decoder<'_>| {
            primary
                .decode_array(d)
                .or_else(|_| secondary.decode_array(d))
        };

        let (primary, secondary) = (self, fallback);
        let lossy = move |d: &Decoder<'_>| {
            lossy_elements(d, |e| primary.decode(e).or_else(|_| secondary.decode(e)))
        };

        Self::from_fns(one, array, lossy)
    }

    /// The context that opens the value as a keyed container of `K` and lets the container pick
    /// the concrete type.
    ///
    /// Arrays are resolved per element, so every element carries its own discriminator. The
    /// lossy routine also skips elements whose discriminator cannot be resolved.
    pub fn keyed<K>() -> Self
    where
        K: ContextCodingKey<Identified = B>,
    {
        Self::from_fns(
            resolve_keyed::<K>,
            |d| strict_elements(d, resolve_keyed::<K>),
            |d| lossy_elements(d, resolve_keyed::<K>),
        )
    }

    /// Decode a single value.
    pub fn decode(&self, decoder: &Decoder<'_>) -> Result<B> {
        (self.one)(decoder)
    }

    /// Decode an array, failing on the first element that does not decode.
    pub fn decode_array(&self, decoder: &Decoder<'_>) -> Result<Vec<B>> {
        (self.array)(decoder)
    }

    /// Decode an array, skipping the elements that do not decode. Never fails.
    pub fn decode_lossy_array(&self, decoder: &Decoder<'_>) -> Vec<B> {
        (self.lossy)(decoder)
    }
}

impl<B> Clone for DecodingContext<B> {
    fn clone(&self) -> Self {
        Self {
            one: Arc::clone(&self.one),
            array: Arc::clone(&self.array),
            lossy: Arc::clone(&self.lossy),
        }
    }
}

impl<B> fmt::Debug for DecodingContext<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecodingContext")
            .field("base", &type_name::<B>())
            .finish()
    }
}

fn resolve_keyed<K: ContextCodingKey>(decoder: &Decoder<'_>) -> Result<K::Identified> {
    let container = decoder.keyed::<K>()?;
    K::context(&container)?.decode(decoder)
}

/// Every element decoded with `element`, or the first failure.
///
/// A value that is not an array is decoded as the sole element.
fn strict_elements<T, F>(decoder: &Decoder<'_>, element: F) -> Result<Vec<T>>
where
    F: Fn(&Decoder<'_>) -> Result<T>,
{
    if !decoder.value().is_array() {
        return element(decoder).map(|value| vec![value]);
    }

    let mut seq = decoder.seq()?;
    let mut values = Vec::with_capacity(seq.len());
    while !seq.is_at_end() {
        values.push(seq.decode_next_with(&element)?);
    }
    Ok(values)
}

/// The elements that decode with `element`, in order.
fn lossy_elements<T, F>(decoder: &Decoder<'_>, element: F) -> Vec<T>
where
    F: Fn(&Decoder<'_>) -> Result<T>,
{
    let mut seq = match decoder.seq() {
        Ok(seq) => seq,
        Err(_) => return element(decoder).ok().into_iter().collect(),
    };

    let mut values = Vec::with_capacity(seq.len());
    while !seq.is_at_end() {
        values.extend(seq.lossy_next(&element));
    }
    values
}
