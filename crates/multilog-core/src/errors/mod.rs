//! Error handling for multilog.
//! One error enum per subsystem, `thiserror` only, aggregated by
//! [`MultilogError`].

pub mod codec_error;
pub mod config_error;
pub mod error_code;
pub mod multilog_error;
pub mod ot_error;
pub mod store_error;
pub mod stream_error;

pub use codec_error::CodecError;
pub use config_error::ConfigError;
pub use error_code::MultilogErrorCode;
pub use multilog_error::{MultilogError, MultilogResult};
pub use ot_error::OtError;
pub use store_error::StoreError;
pub use stream_error::StreamError;
