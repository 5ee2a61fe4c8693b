//! Strategies that produce a [`DecodingContext`] at the point of use.
//!
//! Three strategies share one contract, "given the current decode position, produce a context,
//! fallibly":
//!
//! - **Identifier based.** A sibling field holds an [`IdentifierKey`], a decodable value (usually
//!   a string enum) whose own logic maps each of its cases to a context. The container key type
//!   names the field through [`IdentifierCodingKey`].
//! - **Key identity based.** The keys of a container _are_ the discriminator
//!   ([`ContainerCodingKey`]), as in `{"text": [...], "audio": [...]}`.
//! - **Provider based.** There is no discriminator in the document. The caller injects the
//!   context into the [`DecodeConfig`](crate::DecodeConfig) under a token, and a
//!   [`ConfigContextProvider`] reads it back.
//!
//! Wrappers do not care which strategy they are given. They are parameterized over a
//! [`Resolve`] implementation: [`ByKey`] for the first two, [`ByProvider`] for the last.
use crate::decode::{Decode, Decoder, KeyedContainer};
use crate::path::CodingKey;
use crate::{DecodingContext, Error, Result};
use std::marker::PhantomData;

////////////////////////////// IDENTIFIERS //////////////////////////////

/// A discriminator value that knows which context its cases decode with.
///
/// The mapping is a plain `match` over the cases, so it is exhaustive by construction.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// coding_keys! {
///     enum Unit { Count = "count", Label = "label" }
/// }
///
/// #[derive(Debug, PartialEq)]
/// enum Reading {
///     Count(u64),
///     Label(String),
/// }
///
/// impl DynCast<Reading> for u64 {
///     fn dyn_cast(self) -> std::result::Result<Reading, Self> {
///         Ok(Reading::Count(self))
///     }
/// }
///
/// impl DynCast<Reading> for String {
///     fn dyn_cast(self) -> std::result::Result<Reading, Self> {
///         Ok(Reading::Label(self))
///     }
/// }
///
/// impl IdentifierKey for Unit {
///     type Identified = Reading;
///
///     fn context(&self) -> DecodingContext<Reading> {
///         match self {
///             Unit::Count => DecodingContext::of::<u64>(),
///             Unit::Label => DecodingContext::of::<String>(),
///         }
///     }
/// }
///
/// let value = Value::from("kg");
/// let config = DecodeConfig::new();
/// let decoder = Decoder::new(&value, &config);
/// assert_eq!(Unit::Label.context().decode(&decoder), Ok(Reading::Label("kg".into())));
/// assert!(Unit::Count.context().decode(&decoder).is_err());
/// ```
pub trait IdentifierKey: Decode {
    /// The base type every case decodes to.
    type Identified: 'static;

    /// The context of this case.
    fn context(&self) -> DecodingContext<Self::Identified>;
}

/// A container key type that can resolve a context from the container it keys.
///
/// Implement this directly when the discriminator needs custom logic. Key types with a single
/// identifier field get an implementation through [`IdentifierCodingKey`].
pub trait ContextCodingKey: CodingKey {
    /// The base type the resolved context decodes to.
    type Identified: 'static;

    /// Resolve the context from the open `container`.
    fn context(container: &KeyedContainer<'_, Self>)
        -> Result<DecodingContext<Self::Identified>>;
}

/// A container key type in which one designated key holds an [`IdentifierKey`].
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// coding_keys! {
///     enum Kind { Int = "int", Text = "text" }
/// }
///
/// impl IdentifierKey for Kind {
///     type Identified = String;
///
///     fn context(&self) -> DecodingContext<String> {
///         match self {
///             Kind::Int => DecodingContext::from_fns(
///                 |d| d.decode::<i64>().map(|x| x.to_string()),
///                 |d| d.decode::<Vec<i64>>().map(|v| v.iter().map(ToString::to_string).collect()),
///                 |_| Vec::new(),
///             ),
///             Kind::Text => DecodingContext::of::<String>(),
///         }
///     }
/// }
///
/// coding_keys! {
///     enum FieldKey { Kind = "kind", Value = "value" }
/// }
///
/// impl IdentifierCodingKey for FieldKey {
///     type Identifier = Kind;
///
///     fn identifier_key() -> Self {
///         FieldKey::Kind
///     }
/// }
///
/// let value = serde_json::json!({"kind": "int", "value": 4});
/// let config = DecodeConfig::new();
/// let container = Decoder::new(&value, &config).keyed::<FieldKey>().unwrap();
/// let context = FieldKey::context(&container).unwrap();
/// let nested = container.nested(FieldKey::Value).unwrap();
/// assert_eq!(context.decode(&nested), Ok("4".to_string()));
/// ```
pub trait IdentifierCodingKey: CodingKey {
    /// The discriminator stored under [`identifier_key`](Self::identifier_key).
    type Identifier: IdentifierKey;

    /// The key holding the discriminator.
    fn identifier_key() -> Self;
}

impl<K: IdentifierCodingKey> ContextCodingKey for K {
    type Identified = <K::Identifier as IdentifierKey>::Identified;

    fn context(container: &KeyedContainer<'_, Self>) -> Result<DecodingContext<Self::Identified>> {
        let key = K::identifier_key();
        log::trace!("reading identifier `{}` at {}", key.name(), container.path());
        let identifier = container.decode::<K::Identifier>(key)?;
        Ok(identifier.context())
    }
}

/// A container key type whose keys are themselves the discriminator.
pub trait ContainerCodingKey: CodingKey + Ord {
    /// The base type the values under these keys decode to.
    type Contained: 'static;

    /// The context of the value stored under this key.
    fn contained_context(&self) -> DecodingContext<Self::Contained>;
}

////////////////////////////// PROVIDERS //////////////////////////////

/// A context obtained from outside the document.
pub trait ContextProvider {
    /// The base type the provided context decodes to.
    type Identified: 'static;

    /// Produce the context for the current position.
    fn context(decoder: &Decoder<'_>) -> Result<DecodingContext<Self::Identified>>;
}

/// A provider reading its context from the decode operation's
/// [`DecodeConfig`](crate::DecodeConfig) under [`TOKEN`](Self::TOKEN).
///
/// The lookup fails with [`Error::ContextMissing`] if nothing is stored under the token, and
/// with [`Error::TypeMismatch`] if the stored context has another base type.
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
/// let value = Value::from(3);
///
/// let config = DecodeConfig::new();
/// let decoder = Decoder::new(&value, &config);
/// assert!(Count::context(&decoder).unwrap_err().is_context_missing());
///
/// let config = DecodeConfig::new().with_context("count", DecodingContext::<u64>::of::<u64>());
/// let decoder = Decoder::new(&value, &config);
/// assert_eq!(Count::context(&decoder).unwrap().decode(&decoder), Ok(3));
/// ```
pub trait ConfigContextProvider {
    /// The base type of the stored context.
    type Identified: 'static;

    /// The token the context is stored under.
    const TOKEN: &'static str;
}

impl<P: ConfigContextProvider> ContextProvider for P {
    type Identified = P::Identified;

    fn context(decoder: &Decoder<'_>) -> Result<DecodingContext<Self::Identified>> {
        let config = decoder.config();
        match config.get::<P::Identified>(P::TOKEN) {
            Some(context) => Ok(context.clone()),
            None if config.contains(P::TOKEN) => {
                Err(decoder.type_mismatch::<DecodingContext<P::Identified>>())
            }
            None => Err(Error::ContextMissing {
                token: P::TOKEN,
                path: decoder.path().to_string(),
            }),
        }
    }
}

////////////////////////////// RESOLUTION //////////////////////////////

/// How a wrapper obtains its context.
pub trait Resolve {
    /// The base type the context decodes to.
    type Base: 'static;

    /// Resolve the context at the wrapper's own position.
    fn resolve(decoder: &Decoder<'_>) -> Result<DecodingContext<Self::Base>>;
}

/// Resolve through the container key type `K`: the wrapped value is an object carrying its own
/// discriminator, and arrays of it resolve one element at a time.
pub struct ByKey<K>(PhantomData<fn() -> K>);

impl<K: ContextCodingKey> Resolve for ByKey<K> {
    type Base = K::Identified;

    fn resolve(_: &Decoder<'_>) -> Result<DecodingContext<Self::Base>> {
        Ok(DecodingContext::keyed::<K>())
    }
}

/// Resolve through the provider `P`.
pub struct ByProvider<P>(PhantomData<fn() -> P>);

impl<P: ContextProvider> Resolve for ByProvider<P> {
    type Base = P::Identified;

    fn resolve(decoder: &Decoder<'_>) -> Result<DecodingContext<Self::Base>> {
        log::trace!("resolving provided context at {}", decoder.path());
        P::context(decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeConfig, Value};
    use serde_json::json;

    crate::coding_keys! {
        enum Kind { Int = "int", Text = "text" }
    }

    impl IdentifierKey for Kind {
        type Identified = String;

        fn context(&self) -> DecodingContext<String> {
            match self {
                Kind::Int => DecodingContext::from_fns(
                    |d| d.decode::<i64>().map(|x| x.to_string()),
                    |d| d.decode::<Vec<i64>>().map(|v| v.iter().map(|x| x.to_string()).collect()),
                    |_| Vec::new(),
                ),
                Kind::Text => DecodingContext::of::<String>(),
            }
        }
    }

    crate::coding_keys! {
        enum FieldKey { Kind = "kind", Value = "value" }
    }

    impl IdentifierCodingKey for FieldKey {
        type Identifier = Kind;

        fn identifier_key() -> Self {
            FieldKey::Kind
        }
    }

    struct Texts;

    impl ConfigContextProvider for Texts {
        type Identified = String;
        const TOKEN: &'static str = "texts";
    }

    fn field(kind: &str, value: Value) -> Value {
        json!({"kind": kind, "value": value})
    }

    #[test]
    fn sibling_identifier() {
        let config = DecodeConfig::default();

        let value = field("int", Value::from(-2));
        let c = Decoder::new(&value, &config).keyed::<FieldKey>().unwrap();
        let context = FieldKey::context(&c).unwrap();
        assert_eq!(context.decode(&c.nested(FieldKey::Value).unwrap()), Ok("-2".into()));

        let value = field("float", Value::from(1.5));
        let c = Decoder::new(&value, &config).keyed::<FieldKey>().unwrap();
        assert!(FieldKey::context(&c).is_err());

        let value = json!({"value": 1});
        let c = Decoder::new(&value, &config).keyed::<FieldKey>().unwrap();
        assert!(matches!(
            FieldKey::context(&c),
            Err(Error::KeyNotFound { key, .. }) if key == "kind"
        ));
    }

    #[test]
    fn keyed_resolution_decodes_in_place() {
        // the value carries its own discriminator, so the whole object is decoded
        let config = DecodeConfig::default();
        let value = field("text", Value::from("hi"));
        let decoder = Decoder::new(&value, &config);
        let context = ByKey::<FieldKey>::resolve(&decoder).unwrap();
        assert!(matches!(
            context.decode(&decoder),
            Err(Error::InvalidType { expected: "string", found: "object", .. })
        ));
    }

    #[test]
    fn config_provider() {
        let value = Value::from("hi");

        let config = DecodeConfig::new();
        let decoder = Decoder::new(&value, &config);
        assert_eq!(
            ByProvider::<Texts>::resolve(&decoder).map(|_| ()),
            Err(Error::ContextMissing {
                token: "texts",
                path: "<root>".into()
            })
        );

        let config = DecodeConfig::new().with_context("texts", DecodingContext::<u8>::of::<u8>());
        let decoder = Decoder::new(&value, &config);
        assert!(matches!(
            Texts::context(&decoder),
            Err(Error::TypeMismatch { .. })
        ));

        let config =
            DecodeConfig::new().with_context("texts", DecodingContext::<String>::of::<String>());
        let decoder = Decoder::new(&value, &config);
        let context = ByProvider::<Texts>::resolve(&decoder).unwrap();
        assert_eq!(context.decode(&decoder), Ok("hi".to_string()));
    }
}
