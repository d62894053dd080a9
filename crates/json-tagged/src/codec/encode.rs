//! Extended value → wire value.

use indexmap::IndexMap;
use tracing::trace;

use super::enter;
use super::plain::is_plain_record;
use crate::constants::Tag;
use crate::error::CodecError;
use crate::value::Value;
use crate::wire::WireValue;

/// Encode an extended value into its JSON-safe wire form.
///
/// Never fails. Records owned by a specialized kind encode as
/// [`WireValue::Undefined`].
pub fn encode(value: &Value) -> WireValue {
    encode_within(value, 0, None).unwrap_or(WireValue::Undefined)
}

pub(crate) fn encode_within(
    value: &Value,
    depth: usize,
    limit: Option<usize>,
) -> Result<WireValue, CodecError> {
    match value {
        Value::Null => Ok(WireValue::Null),
        Value::Undefined => Ok(WireValue::Undefined),
        Value::Bool(b) => Ok(WireValue::Bool(*b)),
        Value::Integer(i) => Ok(WireValue::Integer(*i)),
        Value::Float(f) => Ok(WireValue::Float(*f)),
        Value::Str(s) => Ok(WireValue::Str(s.clone())),
        Value::Date(ms) => Ok(WireValue::tagged(Tag::Date, WireValue::Integer(*ms))),
        Value::Bytes(bytes) => {
            let octets = bytes.iter().map(|b| WireValue::Integer(i64::from(*b)));
            Ok(WireValue::tagged(Tag::Buffer, WireValue::Array(octets.collect())))
        }
        Value::Set(set) => {
            let depth = enter(depth, limit)?;
            let items = set
                .iter()
                .map(|item| encode_within(item, depth, limit))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(WireValue::tagged(Tag::Set, WireValue::Array(items)))
        }
        Value::Map(map) => {
            let depth = enter(depth, limit)?;
            let pairs = map
                .iter()
                .map(|(k, v)| {
                    Ok(WireValue::Array(vec![
                        encode_within(k, depth, limit)?,
                        encode_within(v, depth, limit)?,
                    ]))
                })
                .collect::<Result<Vec<_>, CodecError>>()?;
            Ok(WireValue::tagged(Tag::Map, WireValue::Array(pairs)))
        }
        Value::Array(arr) => {
            let depth = enter(depth, limit)?;
            let items = arr
                .iter()
                .map(|item| encode_within(item, depth, limit))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(WireValue::Array(items))
        }
        Value::Object(obj) if is_plain_record(value) => {
            let depth = enter(depth, limit)?;
            let mut fields = IndexMap::with_capacity(obj.len());
            for (key, field) in obj.iter() {
                fields.insert(key.clone(), encode_within(field, depth, limit)?);
            }
            Ok(WireValue::Object(fields))
        }
        Value::Object(obj) => {
            trace!(kind = ?obj.kind, "unsupported record kind encoded as undefined");
            Ok(WireValue::Undefined)
        }
    }
}
