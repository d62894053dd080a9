//! json-tagged - a structural codec that carries dates, byte buffers, sets,
//! maps and the absent marker through plain JSON.
//!
//! [`encode`] turns a [`Value`] tree into a [`WireValue`] tree that only uses
//! JSON shapes; types JSON cannot express are wrapped in a reserved
//! `{"__t": tag, "__v": payload}` record. [`decode`] reverses it.
//!
//! ```
//! use json_tagged::{decode, encode, wire::to_json, Value};
//! use serde_json::json;
//!
//! let v = Value::set([Value::from(1), Value::from(2)]);
//! let wire = encode(&v);
//! assert_eq!(to_json(&wire), json!({"__t": "Set", "__v": [1, 2]}));
//! assert_eq!(decode(&wire), v);
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod json;
pub mod value;
pub mod wire;

pub use codec::{decode, decode_as, encode, is_plain_record, Codec, CodecOptions};
pub use constants::{Tag, PAYLOAD_KEY, TAG_KEY};
pub use error::CodecError;
pub use json::{parse, stringify};
pub use value::{Object, ObjectKind, Value, ValueMap, ValueSet};
pub use wire::WireValue;
