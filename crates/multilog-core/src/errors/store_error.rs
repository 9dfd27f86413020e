//! Commit store errors.

use super::error_code::{self, MultilogErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("commit not found: {0}")]
    CommitNotFound(String),

    #[error("expected a single head, found {0}")]
    MultipleHeads(usize),

    #[error("revision {0} is not an ancestor of the current head")]
    UnknownRevision(String),

    #[error("push still rejected after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("commit store backend: {0}")]
    Backend(String),
}

impl MultilogErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CommitNotFound(_) => error_code::STORE_NOT_FOUND,
            Self::MultipleHeads(_) | Self::UnknownRevision(_) => error_code::STORE_DIVERGED,
            Self::RetriesExhausted { .. } => error_code::STORE_RETRIES_EXHAUSTED,
            Self::Backend(_) => error_code::STORE_BACKEND,
        }
    }
}
