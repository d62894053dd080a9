//! Structural codec between [`Value`] and [`WireValue`].
//!
//! The free [`encode`] / [`decode`] functions walk the whole tree with no
//! depth limit; deeply nested or cyclic input exhausts the stack. [`Codec`]
//! carries a depth ceiling and reports [`CodecError::DepthExceeded`] instead.

mod decode;
mod encode;
mod plain;

pub use decode::{decode, decode_as};
pub use encode::encode;
pub use plain::is_plain_record;

use tracing::debug;

use crate::error::CodecError;
use crate::value::Value;
use crate::wire::{from_json, to_json, WireValue};

/// Step one container level deeper. The root container sits at level 1.
pub(crate) fn enter(depth: usize, limit: Option<usize>) -> Result<usize, CodecError> {
    let next = depth + 1;
    match limit {
        Some(limit) if next > limit => Err(CodecError::DepthExceeded { limit }),
        _ => Ok(next),
    }
}

/// Options controlling the bounded codec.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Maximum number of nested container levels (arrays, records, sets,
    /// maps). `None` walks without a limit.
    pub max_depth: Option<usize>,
}

/// Codec with a configurable depth ceiling.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    pub options: CodecOptions,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(max_depth: usize) -> Self {
        Self::with_options(CodecOptions {
            max_depth: Some(max_depth),
        })
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, value: &Value) -> Result<WireValue, CodecError> {
        encode::encode_within(value, 0, self.options.max_depth)
            .inspect_err(|err| debug!(%err, "encode rejected input"))
    }

    pub fn decode(&self, value: &WireValue) -> Result<Value, CodecError> {
        decode::decode_within(value, 0, self.options.max_depth)
            .inspect_err(|err| debug!(%err, "decode rejected input"))
    }

    /// Encode and serialize to JSON text.
    pub fn stringify(&self, value: &Value) -> Result<String, CodecError> {
        let wire = self.encode(value)?;
        Ok(serde_json::to_string(&to_json(&wire))?)
    }

    /// Parse JSON text and decode it.
    pub fn parse(&self, json: &str) -> Result<Value, CodecError> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        self.decode(&from_json(parsed))
    }
}
