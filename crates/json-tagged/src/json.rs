//! JSON text helpers: encode + serialize, parse + decode.

use crate::codec::{decode, encode};
use crate::error::CodecError;
use crate::value::Value;
use crate::wire::{from_json, to_json};

/// Serialize an extended value to JSON text.
pub fn stringify(value: &Value) -> Result<String, CodecError> {
    let wrapped = to_json(&encode(value));
    Ok(serde_json::to_string(&wrapped)?)
}

/// Parse JSON text and rebuild the extended value it encodes.
pub fn parse(json: &str) -> Result<Value, CodecError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Ok(decode(&from_json(parsed)))
}
