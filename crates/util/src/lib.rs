//! json-tagged-util - small utilities whose outputs travel through the
//! json-tagged codec.

pub mod downtime;
pub mod error;
pub mod execution_cache;
pub mod object_id;

pub use downtime::{merge, DowntimeLog, DowntimeLogs};
pub use error::ObjectIdError;
pub use execution_cache::ExecutionCache;
pub use object_id::{ObjectId, OBJECT_ID_LEN};
