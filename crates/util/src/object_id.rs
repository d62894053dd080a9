//! Monotonic 14-byte identifiers.
//!
//! Layout (big-endian):
//!
//! | bytes  | content                                   |
//! |--------|-------------------------------------------|
//! | 0      | kind                                      |
//! | 1..7   | timestamp, milliseconds, low 48 bits      |
//! | 7..11  | random bytes chosen once per process      |
//! | 11..14 | counter, random start, wraps at 2^24      |

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use json_tagged::Value;
use rand::Rng;

use crate::error::ObjectIdError;

pub const OBJECT_ID_LEN: usize = 14;

const TIMESTAMP_MASK: u64 = 0xffff_ffff_ffff;
const COUNTER_MASK: u32 = 0xff_ffff;

struct ProcessState {
    random: [u8; 4],
    counter: AtomicU32,
}

fn process_state() -> &'static ProcessState {
    static STATE: OnceLock<ProcessState> = OnceLock::new();
    STATE.get_or_init(|| {
        let mut rng = rand::thread_rng();
        ProcessState {
            random: rng.gen(),
            counter: AtomicU32::new(rng.gen_range(0..=COUNTER_MASK)),
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Build an identifier for `kind` at `timestamp_ms`, consuming one
    /// counter value.
    pub fn new(kind: u8, timestamp_ms: u64) -> Self {
        let state = process_state();
        // The u32 wraps at a multiple of 2^24, so the masked value wraps too.
        let counter = state.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut data = [0u8; OBJECT_ID_LEN];
        data[0] = kind;
        data[1..7].copy_from_slice(&(timestamp_ms & TIMESTAMP_MASK).to_be_bytes()[2..]);
        data[7..11].copy_from_slice(&state.random);
        data[11..14].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(data)
    }

    /// Identifier stamped with the current wall-clock time. `kind` defaults
    /// to 0.
    pub fn generate(kind: Option<u8>) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::new(kind.unwrap_or(0), now)
    }

    pub fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.0
    }

    pub fn kind(&self) -> u8 {
        self.0[0]
    }

    pub fn timestamp(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&self.0[1..7]);
        u64::from_be_bytes(buf)
    }

    pub fn counter(&self) -> u32 {
        let mut buf = [0u8; 4];
        buf[1..].copy_from_slice(&self.0[11..14]);
        u32::from_be_bytes(buf)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn to_base64(&self) -> String {
        B64.encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let data: [u8; OBJECT_ID_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ObjectIdError::InvalidLength(bytes.len()))?;
        Ok(Self(data))
    }
}

/// Identifiers cross the codec as their hex string.
impl From<&ObjectId> for Value {
    fn from(id: &ObjectId) -> Self {
        Value::Str(id.to_hex())
    }
}

impl TryFrom<&Value> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => s.parse(),
            _ => Err(ObjectIdError::NotAString),
        }
    }
}
