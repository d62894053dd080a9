//! [`WireValue`]: the JSON-safe tree produced by `encode`.
//!
//! Differs from `serde_json::Value` in one way: it can hold the absent
//! marker, so an in-memory round trip is exact. Going to JSON text through
//! [`to_json`] drops that marker (omitted record field, `null` array slot).

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::constants::{Tag, PAYLOAD_KEY, TAG_KEY};
use crate::value::same_value_zero;

/// Floats compare as SameValueZero, as in [`Value`](crate::Value).
#[derive(Debug, Clone)]
pub enum WireValue {
    Undefined,
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    Array(Vec<WireValue>),
    Object(IndexMap<String, WireValue>),
}

impl WireValue {
    /// The reserved `{ "__t": tag, "__v": payload }` record.
    pub fn tagged(tag: Tag, payload: WireValue) -> Self {
        let mut obj = IndexMap::with_capacity(2);
        obj.insert(TAG_KEY.to_owned(), WireValue::Str(tag.as_str().to_owned()));
        obj.insert(PAYLOAD_KEY.to_owned(), payload);
        WireValue::Object(obj)
    }

    /// Tag name of a record whose `__t` field is a string.
    ///
    /// The name is returned whether or not the codec knows it.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            WireValue::Object(obj) => match obj.get(TAG_KEY) {
                Some(WireValue::Str(name)) => Some(name.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Whether an absent marker appears anywhere in the tree.
    pub fn contains_undefined(&self) -> bool {
        match self {
            WireValue::Undefined => true,
            WireValue::Array(arr) => arr.iter().any(WireValue::contains_undefined),
            WireValue::Object(obj) => obj.values().any(WireValue::contains_undefined),
            _ => false,
        }
    }
}

impl PartialEq for WireValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WireValue::Undefined, WireValue::Undefined) => true,
            (WireValue::Null, WireValue::Null) => true,
            (WireValue::Bool(a), WireValue::Bool(b)) => a == b,
            (WireValue::Integer(a), WireValue::Integer(b)) => a == b,
            (WireValue::Float(a), WireValue::Float(b)) => same_value_zero(*a, *b),
            (WireValue::Str(a), WireValue::Str(b)) => a == b,
            (WireValue::Array(a), WireValue::Array(b)) => a == b,
            (WireValue::Object(a), WireValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Convert a wire tree to `serde_json::Value` ahead of JSON serialization.
///
/// Absent record fields are omitted; absent array slots, an absent root and
/// non-finite floats become `null`.
pub fn to_json(value: &WireValue) -> JsonValue {
    match value {
        WireValue::Undefined | WireValue::Null => JsonValue::Null,
        WireValue::Bool(b) => JsonValue::Bool(*b),
        WireValue::Integer(i) => JsonValue::from(*i),
        WireValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        WireValue::Str(s) => JsonValue::String(s.clone()),
        WireValue::Array(arr) => JsonValue::Array(arr.iter().map(to_json).collect()),
        WireValue::Object(obj) => JsonValue::Object(
            obj.iter()
                .filter(|(_, v)| !matches!(v, WireValue::Undefined))
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}

/// Convert a parsed `serde_json::Value` into a wire tree.
pub fn from_json(value: JsonValue) -> WireValue {
    match value {
        JsonValue::Null => WireValue::Null,
        JsonValue::Bool(b) => WireValue::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => WireValue::Integer(i),
            None => WireValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        JsonValue::String(s) => WireValue::Str(s),
        JsonValue::Array(arr) => WireValue::Array(arr.into_iter().map(from_json).collect()),
        JsonValue::Object(obj) => {
            WireValue::Object(obj.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

impl From<JsonValue> for WireValue {
    fn from(value: JsonValue) -> Self {
        from_json(value)
    }
}

impl From<&WireValue> for JsonValue {
    fn from(value: &WireValue) -> Self {
        to_json(value)
    }
}
