//! Coding keys and the chain of keys leading to a decode position.
//!
//! Every time a decoder descends into an object or an array, the key it descended through is
//! appended to the [`CodingPath`], _keeping the key's concrete type_. A value deep in a document
//! can therefore ask which key of a given type led to it, and use that key as its discriminator.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! coding_keys! {
//!     enum Section { News = "news", Sport = "sport" }
//! }
//!
//! let path = CodingPath::new()
//!     .child(AnyKey::new(&"pages".to_string()))
//!     .child(AnyKey::new(&Section::Sport))
//!     .child(AnyKey::new(&SeqIndex(2)));
//!
//! assert_eq!(path.to_string(), "pages.sport.2");
//! assert_eq!(path.find::<Section>(), Some(Section::Sport));
//! assert_eq!(path.find::<SeqIndex>(), Some(SeqIndex(2)));
//! assert!(CodingPath::new().resolve::<Section>().is_err());
//! ```
use crate::{Error, Result};
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// A key of a keyed container.
///
/// A key type enumerates the keys a container may hold. Keys map to and from their string form in
/// the document. The [`coding_keys!`](crate::coding_keys) macro implements this for string enums.
pub trait CodingKey: Any + Clone + fmt::Debug {
    /// The key's string form in the document.
    fn name(&self) -> Cow<'_, str>;

    /// The key for a string found in the document, if this key type knows it.
    fn from_name(name: &str) -> Option<Self>;
}

impl CodingKey for String {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(name.to_owned())
    }
}

/// The position of an element in an array, as it appears in a coding path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqIndex(pub usize);

impl CodingKey for SeqIndex {
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.to_string())
    }

    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok().map(SeqIndex)
    }
}

/// A type-erased coding key.
#[derive(Clone)]
pub struct AnyKey {
    name: String,
    key: Rc<dyn Any>,
}

impl AnyKey {
    /// Erase a key, remembering its concrete type.
    pub fn new<K: CodingKey>(key: &K) -> Self {
        Self {
            name: key.name().into_owned(),
            key: Rc::new(key.clone()),
        }
    }

    /// The key's string form.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key, if it is of type `K`.
    pub fn downcast<K: CodingKey>(&self) -> Option<K> {
        self.key.downcast_ref::<K>().cloned()
    }

    /// The key is of type `K`.
    pub fn is<K: CodingKey>(&self) -> bool {
        self.key.is::<K>()
    }
}

impl fmt::Debug for AnyKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.name)
    }
}

/// The chain of keys from the document root to a decode position.
///
/// The chain is append-only while descending and is never altered by key lookups.
#[derive(Clone, Default)]
pub struct CodingPath {
    keys: Vec<AnyKey>,
}

impl CodingPath {
    /// The root path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path one level below this one.
    pub fn child(&self, key: AnyKey) -> Self {
        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend(self.keys.iter().cloned());
        keys.push(key);
        Self { keys }
    }

    /// The keys, root first.
    pub fn keys(&self) -> &[AnyKey] {
        &self.keys
    }

    /// Depth of the path.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// The path is the root.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The first key of type `K`, scanning from the root.
    pub fn find<K: CodingKey>(&self) -> Option<K> {
        self.keys.iter().find_map(AnyKey::downcast)
    }

    /// Like [`find`](Self::find) but errors with [`Error::KeyNotFoundInPath`] when no key of type
    /// `K` is present.
    pub fn resolve<K: CodingKey>(&self) -> Result<K> {
        self.find().ok_or_else(|| Error::KeyNotFoundInPath {
            key_type: type_name::<K>(),
            path: self.to_string(),
        })
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "<root>");
        }

        for (idx, key) in self.keys.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", key.name())?;
        }

        Ok(())
    }
}

impl fmt::Debug for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.keys.iter()).finish()
    }
}
