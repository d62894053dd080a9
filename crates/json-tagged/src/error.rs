use thiserror::Error;

/// Errors surfaced by the bounded [`Codec`](crate::Codec) and the JSON text
/// helpers. The free `encode`/`decode` functions never fail.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
