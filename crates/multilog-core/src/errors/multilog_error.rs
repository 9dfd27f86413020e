//! Top-level error aggregating every subsystem via `From` conversions.

use super::error_code::MultilogErrorCode;
use super::{CodecError, ConfigError, OtError, StoreError, StreamError};

#[derive(Debug, thiserror::Error)]
pub enum MultilogError {
    #[error("OT error: {0}")]
    Ot(#[from] OtError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type MultilogResult<T> = Result<T, MultilogError>;

impl MultilogError {
    /// Invariant violations: the process is in a state no retry can fix.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Ot(_))
    }
}

impl MultilogErrorCode for MultilogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ot(e) => e.error_code(),
            Self::Codec(e) => e.error_code(),
            Self::Stream(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
