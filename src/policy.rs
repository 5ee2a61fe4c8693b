//! Failure policies of the collection wrappers.
//!
//! A policy is chosen per field through a zero sized tag type, so it is fixed at compile time:
//!
//! | Tag | Behaviour |
//! | --- | --- |
//! | [`Strict`] | propagate the first error |
//! | [`DefaultEmpty`] | any error yields the default value, never a partial result |
//! | [`Lossy`] | decode element by element, skipping failures; never fails |
use crate::{Error, Result};

/// The runtime form of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailConfig {
    /// Propagate the first error.
    Throw,
    /// Recover to the default value on any error.
    DefaultEmpty,
    /// Keep whatever decodes.
    Lossy,
}

impl FailConfig {
    /// Run the decode the policy calls for.
    ///
    /// `Throw` and `DefaultEmpty` run `strict`. `Lossy` runs only `lossy`.
    ///
    /// # Example
    /// ```rust
    /// # use dynserd::*;
    /// let strict = || Err::<Vec<u8>, _>(Error::message("bad element", &CodingPath::new()));
    ///
    /// assert!(FailConfig::Throw.recover(strict, || vec![1]).is_err());
    /// assert_eq!(FailConfig::DefaultEmpty.recover(strict, || vec![1]), Ok(vec![]));
    /// assert_eq!(FailConfig::Lossy.recover(strict, || vec![1]), Ok(vec![1]));
    /// ```
    pub fn recover<T: Default>(
        self,
        strict: impl FnOnce() -> Result<T>,
        lossy: impl FnOnce() -> T,
    ) -> Result<T> {
        match self {
            FailConfig::Throw => strict(),
            FailConfig::DefaultEmpty => Ok(strict().unwrap_or_else(|e| {
                suppressed(&e, "substituting default");
                T::default()
            })),
            FailConfig::Lossy => Ok(lossy()),
        }
    }
}

/// Log an error a policy chose to swallow.
///
/// A missing context usually means a misconfigured decode, so it is a warning.
pub(crate) fn suppressed(error: &Error, action: &str) {
    if error.is_context_missing() {
        log::warn!("{}: {}", action, error);
    } else {
        log::debug!("{}: {}", action, error);
    }
}

/// A policy tag.
pub trait CollectionPolicy {
    /// The policy the tag selects.
    const CONFIG: FailConfig;
}

/// Propagate the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strict;

/// Recover to the default value on any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultEmpty;

/// Skip what fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lossy;

impl CollectionPolicy for Strict {
    const CONFIG: FailConfig = FailConfig::Throw;
}

impl CollectionPolicy for DefaultEmpty {
    const CONFIG: FailConfig = FailConfig::DefaultEmpty;
}

impl CollectionPolicy for Lossy {
    const CONFIG: FailConfig = FailConfig::Lossy;
}
