//! Interop with [`serde`](https://serde.rs).
//!
//! Domain types defined with `serde_derive` become usable as concrete types of a
//! [`DecodingContext`](crate::DecodingContext) through
//! [`serde_codable!`](crate::serde_codable), which calls [`from_serde`] and [`to_serde`].
//! Both run `serde_json` over the borrowed tree, so decoding does not copy the document.
//!
//! # Example
//! ```rust
//! # use dynserd::*;
//! use serde_derive::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq, Deserialize, Serialize)]
//! struct Link {
//!     url: String,
//! }
//!
//! serde_codable!(Link);
//!
//! let link = Link { url: "https://example.com".into() };
//! let value = link.encode().unwrap();
//! assert_eq!(value, json!({"url": "https://example.com"}));
//! assert_eq!(value.decode::<Link>(), Ok(link));
//! ```
use crate::decode::Decoder;
use crate::path::CodingPath;
use crate::{Error, Result, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Deserialize `T` from the node under the decoder.
///
/// serde's messages are kept as [`Error::Message`] with the decoder's path attached.
pub fn from_serde<T: DeserializeOwned>(decoder: &Decoder<'_>) -> Result<T> {
    <T as Deserialize>::deserialize(decoder.value()).map_err(|e| decoder.error(e))
}

/// Serialize `data` into a [`Value`].
pub fn to_serde<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    serde_json::to_value(data).map_err(|e| Error::message(e, &CodingPath::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeConfig, ValueExt};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn serde_messages_carry_the_path() {
        let value = json!({"outer": {"inner": [1, "two"]}});
        let config = DecodeConfig::new();
        let decoder = Decoder::new(&value, &config);
        let inner = decoder
            .keyed::<String>()
            .and_then(|c| c.nested("outer".into()))
            .and_then(|d| d.keyed::<String>())
            .and_then(|c| c.nested("inner".into()))
            .unwrap();

        let err = from_serde::<Vec<u8>>(&inner).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type: string \"two\", expected u8 at outer.inner"
        );
        assert_eq!(from_serde::<Vec<Value>>(&inner).map(|v| v.len()), Ok(2));
    }

    #[test]
    fn map_keys_must_be_strings() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], true);
        assert!(to_serde(&map).is_err());
        assert_eq!(to_serde(&[1u8, 2]), Ok(json!([1, 2])));
        assert_eq!(json!(null).decode::<Option<u8>>(), Ok(None));
    }
}
