//! Viewing a decoded concrete value as the type a field declares.
//!
//! A discriminator decides the concrete type of a value at run time, yet the field holding it
//! declares a more general type: a boxed trait object, or a closed enum over the concrete
//! types. [`DynCast`] is that conversion. It is implemented by hand (or with
//! [`upcast_boxed!`](crate::upcast_boxed)) for every concrete type a base can hold, and it may
//! refuse, handing the value back.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! #[derive(Debug, PartialEq)]
//! enum Shape {
//!     Circle(f64),
//!     Square(u32),
//! }
//!
//! impl DynCast<Shape> for f64 {
//!     fn dyn_cast(self) -> std::result::Result<Shape, Self> {
//!         Ok(Shape::Circle(self))
//!     }
//! }
//!
//! impl DynCast<Shape> for u32 {
//!     fn dyn_cast(self) -> std::result::Result<Shape, Self> {
//!         // only even squares are shapes
//!         if self % 2 == 0 { Ok(Shape::Square(self)) } else { Err(self) }
//!     }
//! }
//!
//! let path = CodingPath::new();
//! assert_eq!(cast::<_, Shape>(1.5, &path), Ok(Shape::Circle(1.5)));
//! assert!(cast::<_, Shape>(3u32, &path).is_err());
//! assert_eq!(cast_optional::<_, Shape>(3u32), None);
//! assert_eq!(promote::<_, Vec<Shape>>(4u32, &path), Ok(vec![Shape::Square(4)]));
//! assert_eq!(cast_each::<_, Vec<Shape>>(vec![2u32, 4], &path).map(|v| v.len()), Ok(2));
//! ```
use crate::path::CodingPath;
use crate::{Error, Result};
use std::any::type_name;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

/// A run time conversion of a concrete value into the base type `B`.
///
/// Every type trivially casts to itself.
pub trait DynCast<B>: Sized {
    /// Convert into `B`, or give the value back if it cannot be viewed as `B`.
    fn dyn_cast(self) -> std::result::Result<B, Self>;
}

impl<T> DynCast<T> for T {
    fn dyn_cast(self) -> std::result::Result<T, T> {
        Ok(self)
    }
}

/// A collection that can be built from a sequence of its elements.
///
/// This is the only capability the collection wrappers need, so arrays, deques and sets are all
/// valid collection fields.
pub trait Collection: Default {
    /// The element type.
    type Element;

    /// Build the collection from `elements`.
    fn from_elements<I: IntoIterator<Item = Self::Element>>(elements: I) -> Self;

    /// The collection holds no elements.
    fn is_empty(&self) -> bool;
}

impl<T> Collection for Vec<T> {
    type Element = T;

    fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements.into_iter().collect()
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T> Collection for VecDeque<T> {
    type Element = T;

    fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements.into_iter().collect()
    }

    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

impl<T: Ord> Collection for BTreeSet<T> {
    type Element = T;

    fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements.into_iter().collect()
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }
}

impl<T: Eq + Hash> Collection for HashSet<T> {
    type Element = T;

    fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements.into_iter().collect()
    }

    fn is_empty(&self) -> bool {
        HashSet::is_empty(self)
    }
}

/// Cast `value` to `B`, failing with [`Error::TypeMismatch`] at `path`.
pub fn cast<T: DynCast<B>, B>(value: T, path: &CodingPath) -> Result<B> {
    value.dyn_cast().map_err(|_| Error::TypeMismatch {
        expected: type_name::<B>(),
        path: path.to_string(),
    })
}

/// Cast `value` to `B`, treating a refused cast as no value.
pub fn cast_optional<T: DynCast<B>, B>(value: T) -> Option<B> {
    value.dyn_cast().ok()
}

/// Cast a single `value` into a one element collection.
pub fn promote<T, C>(value: T, path: &CodingPath) -> Result<C>
where
    T: DynCast<C::Element>,
    C: Collection,
{
    cast(value, path).map(|element| C::from_elements(Some(element)))
}

/// Cast every element of `values`, collecting into `C`. The first refused element fails the
/// whole cast.
pub fn cast_each<I, C>(values: I, path: &CodingPath) -> Result<C>
where
    I: IntoIterator,
    I::Item: DynCast<C::Element>,
    C: Collection,
{
    values
        .into_iter()
        .map(|value| cast(value, path))
        .collect::<Result<Vec<_>>>()
        .map(C::from_elements)
}

/// Implement [`DynCast`] into a boxed trait object for concrete types.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// trait Animal {
///     fn sound(&self) -> &'static str;
/// }
///
/// struct Dog;
/// struct Cat;
///
/// impl Animal for Dog {
///     fn sound(&self) -> &'static str { "woof" }
/// }
///
/// impl Animal for Cat {
///     fn sound(&self) -> &'static str { "meow" }
/// }
///
/// upcast_boxed!(Box<dyn Animal>: Dog, Cat);
///
/// let animal = cast::<_, Box<dyn Animal>>(Cat, &CodingPath::new()).ok().unwrap();
/// assert_eq!(animal.sound(), "meow");
/// ```
#[macro_export]
macro_rules! upcast_boxed {
    ($base:ty: $($concrete:ty),+ $(,)?) => {
        $(
        impl $crate::DynCast<$base> for $concrete {
            fn dyn_cast(self) -> ::std::result::Result<$base, Self> {
                ::std::result::Result::Ok(::std::boxed::Box::new(self))
            }
        }
        )+
    };
}
