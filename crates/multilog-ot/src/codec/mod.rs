//! JSON wire codec for log diffs.

pub mod domain_codec;
pub mod log_diff_codec;

pub use domain_codec::{DomainCodec, JsonCodec};
pub use log_diff_codec::LogDiffCodec;
