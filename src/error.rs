use crate::path::CodingPath;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while decoding or encoding.
///
/// Every variant carries the rendered [`CodingPath`] of the position it was raised at, root to
/// leaf, joined with `.`.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// let value = serde_json::json!("text");
/// let err = value.decode::<u32>().unwrap_err();
/// assert_eq!(
///     err,
///     Error::InvalidType { expected: "u32", found: "string", path: "<root>".to_string() }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A decoded value could not be viewed as the requested type.
    #[error("failed to cast to `{expected}` at {path}")]
    TypeMismatch {
        /// Name of the requested type.
        expected: &'static str,
        /// Where the cast was attempted.
        path: String,
    },
    /// A context was requested from the [`DecodeConfig`](crate::DecodeConfig) but none was
    /// provided under the token.
    #[error("no decoding context provided under `{token}` at {path}")]
    ContextMissing {
        /// The token the context was looked up with.
        token: &'static str,
        /// Where the context was requested.
        path: String,
    },
    /// No ancestor key of the requested type exists in the coding path.
    #[error("coding key of type `{key_type}` not found in coding path {path}")]
    KeyNotFoundInPath {
        /// Name of the requested key type.
        key_type: &'static str,
        /// The path that was searched.
        path: String,
    },
    /// A keyed container does not hold the key.
    #[error("key `{key}` not found at {path}")]
    KeyNotFound {
        /// The missing key.
        key: String,
        /// Path of the container.
        path: String,
    },
    /// The document holds a different kind of value than the one asked for.
    #[error("invalid type: expected {expected}, found {found} at {path}")]
    InvalidType {
        /// What was expected.
        expected: &'static str,
        /// The JSON kind found.
        found: &'static str,
        /// Where it was found.
        path: String,
    },
    /// Any other document error, including those raised by serde.
    #[error("{message} at {path}")]
    Message {
        /// The description.
        message: String,
        /// Where the error was raised.
        path: String,
    },
    /// The JSON text could not be parsed.
    #[error("failed to parse json: {message}")]
    Syntax {
        /// serde_json's description, including the position.
        message: String,
        /// Line of the error, starting at 1.
        line: usize,
        /// Column of the error, starting at 1.
        column: usize,
    },
}

impl Error {
    /// A free form error at `path`.
    pub fn message<T: fmt::Display>(message: T, path: &CodingPath) -> Self {
        Error::Message {
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    /// The error was raised because a needed context was absent.
    pub fn is_context_missing(&self) -> bool {
        matches!(self, Error::ContextMissing { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Syntax {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}
