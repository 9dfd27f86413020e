//! Round-processing errors. Any of these aborts the whole round.

use super::error_code::{self, MultilogErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("partition {partition} failed: {message}")]
    Source { partition: String, message: String },

    #[error("partition {partition} ended without reporting its final position")]
    Truncated { partition: String },

    #[error("consumer failed: {0}")]
    Consumer(String),

    #[error("invalid fan-out topology: {0}")]
    Topology(String),

    #[error("consumer aborted by an earlier failure")]
    Aborted,
}

impl MultilogErrorCode for StreamError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Source { .. } => error_code::STREAM_SOURCE,
            Self::Truncated { .. } => error_code::STREAM_TRUNCATED,
            Self::Consumer(_) => error_code::STREAM_CONSUMER,
            Self::Topology(_) => error_code::STREAM_TOPOLOGY,
            Self::Aborted => error_code::STREAM_ABORTED,
        }
    }
}
