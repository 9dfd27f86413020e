// Single source of truth for all default values.

// --- Replica commit loop ---
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 10;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 1_000;

// --- Streams ---
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
