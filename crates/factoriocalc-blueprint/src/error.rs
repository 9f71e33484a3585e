//! Blueprint codec errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("blueprint string is empty")]
    Empty,
    #[error("unknown blueprint format version {0:?}")]
    UnknownFormatVersion(char),
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("deflate decompress failed: {0}")]
    Inflate(#[from] std::io::Error),
    #[error("blueprint JSON was malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("blueprint has no entities to bound")]
    NoEntities,
}
