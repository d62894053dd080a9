//! Wire value → extended value.
//!
//! Malformed tagged payloads never abort decoding: the affected subtree is
//! replaced by an empty container or an absent placeholder.

use indexmap::IndexMap;
use tracing::trace;

use super::enter;
use crate::constants::{Tag, PAYLOAD_KEY};
use crate::error::CodecError;
use crate::value::{Object, ObjectKind, Value, ValueMap, ValueSet};
use crate::wire::WireValue;

/// Decode a wire value back into an extended value. Never fails.
pub fn decode(value: &WireValue) -> Value {
    decode_within(value, 0, None).unwrap_or(Value::Undefined)
}

/// Decode and convert into the shape the caller expects.
///
/// Returns `None` when the decoded value is of a different variant.
pub fn decode_as<T>(value: &WireValue) -> Option<T>
where
    T: TryFrom<Value>,
{
    T::try_from(decode(value)).ok()
}

pub(crate) fn decode_within(
    value: &WireValue,
    depth: usize,
    limit: Option<usize>,
) -> Result<Value, CodecError> {
    match value {
        WireValue::Undefined => Ok(Value::Undefined),
        WireValue::Null => Ok(Value::Null),
        WireValue::Bool(b) => Ok(Value::Bool(*b)),
        WireValue::Integer(i) => Ok(Value::Integer(*i)),
        WireValue::Float(f) => Ok(Value::Float(*f)),
        WireValue::Str(s) => Ok(Value::Str(s.clone())),
        WireValue::Array(arr) => {
            let depth = enter(depth, limit)?;
            let items = arr
                .iter()
                .map(|item| decode_within(item, depth, limit))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(items))
        }
        WireValue::Object(obj) => {
            if let Some(tag) = value.tag_name().and_then(Tag::from_name) {
                return decode_tagged(tag, obj.get(PAYLOAD_KEY), depth, limit);
            }
            let depth = enter(depth, limit)?;
            let mut fields = IndexMap::with_capacity(obj.len());
            for (key, field) in obj {
                fields.insert(key.clone(), decode_within(field, depth, limit)?);
            }
            Ok(Value::Object(Object {
                kind: ObjectKind::Plain,
                fields,
            }))
        }
    }
}

fn decode_tagged(
    tag: Tag,
    payload: Option<&WireValue>,
    depth: usize,
    limit: Option<usize>,
) -> Result<Value, CodecError> {
    let items = payload.and_then(WireValue::as_array);
    if items.is_none() && tag != Tag::Date {
        trace!(%tag, "tagged payload is not an array, decoding as empty");
    }
    let items = items.unwrap_or_default();
    match tag {
        Tag::Date => Ok(Value::Date(payload.map_or(0, to_millis))),
        Tag::Buffer => Ok(Value::Bytes(items.iter().map(to_uint8).collect())),
        Tag::Set => {
            let depth = enter(depth, limit)?;
            let mut set = ValueSet::new();
            for item in items {
                set.insert(decode_within(item, depth, limit)?);
            }
            Ok(Value::Set(set))
        }
        Tag::Map => {
            let depth = enter(depth, limit)?;
            let mut map = ValueMap::new();
            for entry in items {
                match entry.as_array() {
                    Some([key, val]) => {
                        let key = decode_within(key, depth, limit)?;
                        map.insert(key, decode_within(val, depth, limit)?);
                    }
                    _ => {
                        trace!("map entry is not a two-element array, decoding as undefined pair");
                        map.insert(Value::Undefined, Value::Undefined);
                    }
                }
            }
            Ok(Value::Map(map))
        }
    }
}

/// Numeric reading of a payload scalar, following JSON-host number coercion.
fn to_number(value: &WireValue) -> f64 {
    match value {
        WireValue::Null => 0.0,
        WireValue::Bool(b) => f64::from(u8::from(*b)),
        WireValue::Integer(i) => *i as f64,
        WireValue::Float(f) => *f,
        WireValue::Str(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        WireValue::Undefined | WireValue::Array(_) | WireValue::Object(_) => f64::NAN,
    }
}

/// Epoch milliseconds; fractions truncate, NaN reads as 0, out-of-range
/// values saturate.
fn to_millis(value: &WireValue) -> i64 {
    match value {
        WireValue::Integer(i) => *i,
        other => to_number(other) as i64,
    }
}

/// Byte value modulo 256; non-numeric and non-finite input reads as 0.
fn to_uint8(value: &WireValue) -> u8 {
    match value {
        WireValue::Integer(i) => *i as u8,
        other => {
            let n = to_number(other);
            if n.is_finite() {
                n.trunc().rem_euclid(256.0) as u8
            } else {
                0
            }
        }
    }
}
