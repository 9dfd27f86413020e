use serde::{Deserialize, Serialize};

use super::defaults;

/// Partition stream configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Bound of the channel bridging a blocking reader into a round.
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: defaults::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
