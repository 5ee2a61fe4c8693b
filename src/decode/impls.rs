use super::*;
use crate::ds::integer;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

////////////////////////////// PRIMITIVES //////////////////////////////

impl Decode for bool {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.value().as_bool().ok_or_else(|| decoder.invalid_type("boolean"))
    }
}

macro_rules! decode_int {
    ( $( $t:ty ),* ) => {
        $(
        impl Decode for $t {
            fn decode(decoder: &Decoder<'_>) -> Result<Self> {
                let n = match decoder.value() {
                    Value::Number(n) => integer(n),
                    _ => None,
                };
                n.and_then(|x| <$t>::try_from(x).ok())
                    .ok_or_else(|| decoder.invalid_type(stringify!($t)))
            }
        }
        )*
    };
}

decode_int!(usize, u8, u16, u32, u64, isize, i8, i16, i32, i64);

impl Decode for f64 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder
            .value()
            .as_f64()
            .ok_or_else(|| decoder.invalid_type("f64"))
    }
}

impl Decode for f32 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        f64::decode(decoder).map(|x| x as f32)
    }
}

impl Decode for String {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder
            .value()
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| decoder.invalid_type("string"))
    }
}

impl Decode for char {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let mut chars = decoder.value().as_str().map(str::chars);
        match chars.as_mut().map(|c| (c.next(), c.next())) {
            Some((Some(ch), None)) => Ok(ch),
            _ => Err(decoder.invalid_type("char")),
        }
    }
}

impl Decode for Value {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(decoder.value().clone())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        if decoder.value().is_null() {
            Ok(None)
        } else {
            T::decode(decoder).map(Some)
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        T::decode(decoder).map(Box::new)
    }
}

////////////////////////////// SEQUENCES //////////////////////////////

fn decode_seq<T: Decode, C: FromIterator<T>>(decoder: &Decoder<'_>) -> Result<C> {
    let mut seq = decoder.seq()?;
    let mut values = Vec::with_capacity(seq.len());
    while !seq.is_at_end() {
        values.push(seq.decode_next()?);
    }
    Ok(values.into_iter().collect())
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_seq(decoder)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_seq(decoder)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_seq(decoder)
    }
}

impl<T: Decode + Eq + Hash> Decode for HashSet<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_seq(decoder)
    }
}

////////////////////////////// MAPS //////////////////////////////

fn decode_map<K: CodingKey, V: Decode, C: FromIterator<(K, V)>>(
    decoder: &Decoder<'_>,
) -> Result<C> {
    let container = decoder.keyed::<K>()?;
    container
        .all_keys()
        .into_iter()
        .map(|key| -> Result<(K, V)> { Ok((key.clone(), container.decode(key)?)) })
        .collect()
}

impl<K: CodingKey + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_map(decoder)
    }
}

impl<K: CodingKey + Eq + Hash, V: Decode> Decode for HashMap<K, V> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decode_map(decoder)
    }
}
