//! Configuration system for multilog.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod defaults;
pub mod multilog_config;
pub mod observability_config;
pub mod retry_config;
pub mod stream_config;

pub use multilog_config::MultilogConfig;
pub use observability_config::ObservabilityConfig;
pub use retry_config::RetryConfig;
pub use stream_config::StreamConfig;
