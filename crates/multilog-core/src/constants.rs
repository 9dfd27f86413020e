/// Multilog version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file looked up in the root passed to `MultilogConfig::load`.
pub const CONFIG_FILENAME: &str = "multilog.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "MULTILOG_LOG";

// Top-level field names of an encoded `LogDiff`.
pub const WIRE_POSITIONS: &str = "positions";
pub const WIRE_OPS: &str = "ops";
