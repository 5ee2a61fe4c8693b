use crate::DecodingContext;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Contexts injected by the caller for a whole decode operation.
///
/// Some values carry no discriminator in the document at all. For those the caller decides the
/// concrete type up front and hands a [`DecodingContext`] to the decode entry point under an
/// opaque token. A [`ConfigContextProvider`](crate::ConfigContextProvider) reads it back while
/// decoding.
///
/// The config is populated before decoding starts and only read while decoding. It is `Send` and
/// `Sync`, so one config can serve decodes on several threads.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// let config = DecodeConfig::new().with_context("count", DecodingContext::<u64>::of::<u64>());
///
/// assert!(config.contains("count"));
/// assert!(config.get::<u64>("count").is_some());
/// // the token exists but holds a context of another base type
/// assert!(config.get::<String>("count").is_none());
/// assert!(config.get::<u64>("other").is_none());
/// ```
#[derive(Clone, Default)]
pub struct DecodeConfig {
    contexts: BTreeMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl DecodeConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_context`](Self::insert_context).
    pub fn with_context<B: 'static>(
        mut self,
        token: &'static str,
        context: DecodingContext<B>,
    ) -> Self {
        self.insert_context(token, context);
        self
    }

    /// Store `context` under `token`, replacing any context stored there before.
    ///
    /// Returns `true` if a context was replaced.
    pub fn insert_context<B: 'static>(
        &mut self,
        token: &'static str,
        context: DecodingContext<B>,
    ) -> bool {
        self.contexts.insert(token, Arc::new(context)).is_some()
    }

    /// Remove the context under `token`. Returns `true` if there was one.
    pub fn remove(&mut self, token: &str) -> bool {
        self.contexts.remove(token).is_some()
    }

    /// A context of any base type is stored under `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.contexts.contains_key(token)
    }

    /// The context under `token`, if there is one and its base type is `B`.
    pub fn get<B: 'static>(&self, token: &str) -> Option<&DecodingContext<B>> {
        self.contexts.get(token)?.downcast_ref()
    }
}

impl fmt::Debug for DecodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.contexts.keys()).finish()
    }
}
