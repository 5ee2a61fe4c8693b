//! Declarative helpers for the types consumers define.

/// Declare a string-valued key enum.
///
/// Each variant is bound to its string form in the document. The enum derives `Debug`, `Clone`,
/// `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord` and `Hash`, and implements
/// [`CodingKey`](crate::CodingKey), [`Decode`](crate::Decode), [`Encode`](crate::Encode) and
/// [`DynEncode`](crate::DynEncode). Decoding a string no variant is bound to is an error.
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// coding_keys! {
///     /// The kinds of post.
///     pub enum PostType {
///         Text = "text",
///         Picture = "picture",
///     }
/// }
///
/// assert_eq!(PostType::Picture.name(), "picture");
/// assert_eq!(PostType::from_name("text"), Some(PostType::Text));
/// assert_eq!(Value::from("picture").decode::<PostType>(), Ok(PostType::Picture));
/// assert!(Value::from("audio").decode::<PostType>().is_err());
/// assert_eq!(PostType::Text.encode(), Ok(Value::from("text")));
/// ```
#[macro_export]
macro_rules! coding_keys {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$( $(#[$vmeta:meta])* $variant:ident = $key:literal ),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		$vis enum $name {
			$( $(#[$vmeta])* $variant ),+
		}

		impl $crate::CodingKey for $name {
			fn name(&self) -> ::std::borrow::Cow<'_, str> {
				match self {
					$( $name::$variant => ::std::borrow::Cow::Borrowed($key), )+
				}
			}

			fn from_name(name: &str) -> ::std::option::Option<Self> {
				match name {
					$( $key => ::std::option::Option::Some($name::$variant), )+
					_ => ::std::option::Option::None,
				}
			}
		}

		impl $crate::Decode for $name {
			fn decode(decoder: &$crate::Decoder<'_>) -> $crate::Result<Self> {
				let name = decoder.decode::<::std::string::String>()?;
				<Self as $crate::CodingKey>::from_name(&name).ok_or_else(|| {
					decoder.error(::std::format!(
						"unknown {} `{}`",
						::std::stringify!($name),
						name
					))
				})
			}
		}

		impl $crate::Encode for $name {
			fn encode(&self) -> $crate::Result<$crate::Value> {
				let name = <Self as $crate::CodingKey>::name(self);
				::std::result::Result::Ok($crate::Value::String(name.into_owned()))
			}
		}

		impl $crate::DynEncode for $name {
			fn dyn_encode(&self) -> $crate::Result<::std::option::Option<$crate::Value>> {
				$crate::Encode::encode(self).map(::std::option::Option::Some)
			}
		}
	};
}

/// Implement [`Decode`](crate::Decode), [`Encode`](crate::Encode) and
/// [`DynEncode`](crate::DynEncode) for types implementing serde's `Deserialize` and `Serialize`.
///
/// This is how a domain type defined with `serde_derive` becomes
/// usable as a concrete type of a [`DecodingContext`](crate::DecodingContext).
///
/// # Example
/// ```rust
/// # use dynserd::*;
/// use serde_derive::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Deserialize, Serialize)]
/// struct Text { text: String }
///
/// #[derive(Debug, PartialEq, Deserialize, Serialize)]
/// struct Picture { url: String }
///
/// serde_codable!(Text, Picture);
///
/// let value = serde_json::json!({"text": "hi"});
/// assert_eq!(value.decode::<Text>(), Ok(Text { text: "hi".into() }));
/// assert!(value.decode::<Picture>().is_err());
/// assert_eq!(Text { text: "hi".into() }.dyn_encode(), Ok(Some(value)));
/// ```
#[macro_export]
macro_rules! serde_codable {
	( $( $t:ty ),+ $(,)? ) => {
		$(
			impl $crate::Decode for $t {
				fn decode(decoder: &$crate::Decoder<'_>) -> $crate::Result<Self> {
					$crate::bridge::from_serde(decoder)
				}
			}

			impl $crate::Encode for $t {
				fn encode(&self) -> $crate::Result<$crate::Value> {
					$crate::bridge::to_serde(self)
				}
			}

			impl $crate::DynEncode for $t {
				fn dyn_encode(&self) -> $crate::Result<::std::option::Option<$crate::Value>> {
					$crate::bridge::to_serde(self).map(::std::option::Option::Some)
				}
			}
		)+
	};
}

#[cfg(test)]
mod tests {
    use crate::*;

    coding_keys! {
        enum Key {
            /// documented
            Alpha = "alpha",
            Beta = "b-e-t-a",
        }
    }

    #[test]
    fn keys() {
        assert_eq!(Key::Beta.name(), "b-e-t-a");
        assert_eq!(Key::from_name("alpha"), Some(Key::Alpha));
        assert_eq!(Key::from_name("Alpha"), None);
        assert!(Key::Alpha < Key::Beta);

        let err = Value::from("gamma").decode::<Key>().unwrap_err();
        assert_eq!(err.to_string(), "unknown Key `gamma` at <root>");
        assert!(Value::from(1).decode::<Key>().is_err());
        assert_eq!(Key::Beta.dyn_encode(), Ok(Some(Value::from("b-e-t-a"))));
    }
}
