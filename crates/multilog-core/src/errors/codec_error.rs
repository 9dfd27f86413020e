//! Wire decoding errors. Always reported to the caller of `decode`.

use super::error_code::{self, MultilogErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid wire JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected} at {path}")]
    UnexpectedType { path: String, expected: &'static str },

    #[error("unknown field `{field}` at {path}")]
    UnknownField { path: String, field: String },

    #[error("duplicate partition `{0}`")]
    DuplicatePartition(String),

    #[error("domain diff at {path}: {message}")]
    Domain { path: String, message: String },
}

impl MultilogErrorCode for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => error_code::CODEC_UNKNOWN_FIELD,
            _ => error_code::CODEC_ERROR,
        }
    }
}
