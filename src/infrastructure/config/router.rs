//! Store call policy.

use std::time::Duration;

use serde::Deserialize;

use crate::application::client::ClientServiceConfig;

/// Timeout and partial-write policy applied to every request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Upper bound on a single store call, in milliseconds.
    pub store_timeout_ms: u64,
    /// Delete the document again when the relational write fails.
    pub compensate_partial_writes: bool,
}

impl RouterConfig {
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5000,
            compensate_partial_writes: true,
        }
    }
}

impl From<&RouterConfig> for ClientServiceConfig {
    fn from(config: &RouterConfig) -> Self {
        Self {
            store_timeout: config.store_timeout(),
            compensate_partial_writes: config.compensate_partial_writes,
        }
    }
}
