//! Polymorphic decoding and encoding of self-describing documents.
//!
//! A document often holds values whose concrete type is only known once part of it has been
//! read: a `"type"` field next to the data, the keys of an enclosing object, or something the
//! caller knows ahead of time. `dynserd` decodes such values into a _base type_, typically a
//! boxed trait object, through a [`DecodingContext`]: the set of decode routines for one concrete
//! type, viewed as the base.
//!
//! The pieces, bottom up:
//!
//! - [`Value`] is `serde_json`'s document tree, read by a [`Decoder`] that tracks the
//!   [`CodingPath`] of typed [`CodingKey`]s leading to it. [`ValueExt`] adds the entry points.
//! - [`DynCast`] is the one-way view of a concrete type as a base type.
//! - [`DecodingContext`] decodes one value, an array, or an array skipping what does not decode.
//! - Providers find the context: a sibling discriminator ([`IdentifierCodingKey`]), the keys of
//!   the container ([`ContainerCodingKey`]) or the [`DecodeConfig`] side-channel
//!   ([`ConfigContextProvider`]).
//! - The wrappers of [`wrap`] hold struct fields and apply a failure policy ([`Strict`],
//!   [`DefaultEmpty`] or [`Lossy`]) uniformly to single values, collections and dictionaries.
//! - [`DynEncode`] writes base-typed values back as whatever concrete type they hold.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! use serde_derive::{Deserialize, Serialize};
//!
//! trait Post: DynEncode {
//!     fn id(&self) -> u32;
//! }
//!
//! #[derive(Deserialize, Serialize)]
//! struct TextPost { id: u32, text: String }
//!
//! #[derive(Deserialize, Serialize)]
//! struct PicturePost { id: u32, url: String }
//!
//! serde_codable!(TextPost, PicturePost);
//! upcast_boxed!(Box<dyn Post>: TextPost, PicturePost);
//!
//! impl Post for TextPost {
//!     fn id(&self) -> u32 { self.id }
//! }
//!
//! impl Post for PicturePost {
//!     fn id(&self) -> u32 { self.id }
//! }
//!
//! coding_keys! {
//!     enum PostType { Text = "text", Picture = "picture" }
//! }
//!
//! impl IdentifierKey for PostType {
//!     type Identified = Box<dyn Post>;
//!
//!     fn context(&self) -> DecodingContext<Box<dyn Post>> {
//!         match self {
//!             PostType::Text => DecodingContext::of::<TextPost>(),
//!             PostType::Picture => DecodingContext::of::<PicturePost>(),
//!         }
//!     }
//! }
//!
//! coding_keys! {
//!     enum PostKey { Type = "type" }
//! }
//!
//! impl IdentifierCodingKey for PostKey {
//!     type Identifier = PostType;
//!
//!     fn identifier_key() -> Self {
//!         PostKey::Type
//!     }
//! }
//!
//! let json = r#"[
//!     {"type": "text", "id": 1, "text": "Hello"},
//!     {"type": "audio", "id": 2},
//!     {"type": "picture", "id": 3, "url": "https://example.com/a.png"},
//!     {"type": "picture", "id": 4}
//! ]"#;
//!
//! let posts: LossyArray<ByKey<PostKey>> = from_str(json).unwrap();
//! let ids: Vec<u32> = posts.iter().map(|post| post.id()).collect();
//! assert_eq!(ids, vec![1, 3]);
//!
//! assert!(from_str::<StrictArray<ByKey<PostKey>>>(json).is_err());
//! assert!(from_str::<DefaultArray<ByKey<PostKey>>>(json).unwrap().is_empty());
//! ```
#![warn(missing_docs)]

mod cast;
mod context;
mod ds;
mod error;
mod macros;
mod path;
mod policy;
mod provider;

pub mod bridge;
pub mod decode;
pub mod encode;
pub mod wrap;

pub use cast::{cast, cast_each, cast_optional, promote, Collection, DynCast};
pub use context::DecodingContext;
pub use decode::{Decode, DecodeConfig, Decoder, KeyedContainer, SeqContainer};
pub use ds::{Map, Number, Value, ValueExt};
pub use encode::{DynEncode, Encode, KeyedEncoder, SeqEncoder};
pub use error::{Error, Result};
pub use path::{AnyKey, CodingKey, CodingPath, SeqIndex};
pub use policy::{CollectionPolicy, DefaultEmpty, FailConfig, Lossy, Strict};
pub use provider::{
    ByKey, ByProvider, ConfigContextProvider, ContainerCodingKey, ContextCodingKey,
    ContextProvider, IdentifierCodingKey, IdentifierKey, Resolve,
};
pub use wrap::{
    DefaultArray, DefaultCollection, DefaultDynamic, DefaultPathKey, DynamicCollection,
    DynamicCollectionDictionary, DynamicDictionary, DynamicField, DynamicValue, Field,
    LossyArray, LossyCollection, OptionalDynamic, OptionalPathKey, PathKey, StrictArray,
    StrictCollection,
};

/// Parse `json` and decode it as `T`, with no side-channel contexts.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// let values: Vec<Option<u8>> = from_str("[1, null, 3]").unwrap();
/// assert_eq!(values, vec![Some(1), None, Some(3)]);
///
/// assert!(matches!(from_str::<Vec<u8>>("[1, 2"), Err(Error::Syntax { .. })));
/// ```
pub fn from_str<T: Decode>(json: &str) -> Result<T> {
    from_str_with(json, &DecodeConfig::default())
}

/// Parse `json` and decode it as `T` with the contexts held in `config`.
///
/// Parsing is done by `serde_json`, which refuses documents nested deeper than 128 levels.
pub fn from_str_with<T: Decode>(json: &str, config: &DecodeConfig) -> Result<T> {
    let value: Value = serde_json::from_str(json)?;
    log::trace!("parsed {} bytes of json", json.len());
    value.decode_with(config)
}
