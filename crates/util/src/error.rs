use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectIdError {
    #[error("invalid object id hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("object id must be 14 bytes, got {0}")]
    InvalidLength(usize),
    #[error("object id value must be a string")]
    NotAString,
}
