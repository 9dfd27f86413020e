//! Stable error codes attached to log events and surfaced to embedders.

/// Every multilog error enum maps each variant to a stable code string.
pub trait MultilogErrorCode {
    /// Returns the code string (e.g., "OT_CONTINUITY").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const OT_CONTINUITY: &str = "OT_CONTINUITY";
pub const OT_ANCHOR_MISMATCH: &str = "OT_ANCHOR_MISMATCH";
pub const CODEC_ERROR: &str = "CODEC_ERROR";
pub const CODEC_UNKNOWN_FIELD: &str = "CODEC_UNKNOWN_FIELD";
pub const STREAM_SOURCE: &str = "STREAM_SOURCE";
pub const STREAM_TRUNCATED: &str = "STREAM_TRUNCATED";
pub const STREAM_CONSUMER: &str = "STREAM_CONSUMER";
pub const STREAM_TOPOLOGY: &str = "STREAM_TOPOLOGY";
pub const STREAM_ABORTED: &str = "STREAM_ABORTED";
pub const STORE_NOT_FOUND: &str = "STORE_NOT_FOUND";
pub const STORE_DIVERGED: &str = "STORE_DIVERGED";
pub const STORE_RETRIES_EXHAUSTED: &str = "STORE_RETRIES_EXHAUSTED";
pub const STORE_BACKEND: &str = "STORE_BACKEND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
