//! Per-call deadline for store operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::StoreKind;
use crate::error::StoreError;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Bounds every store call with the same timeout.
#[derive(Debug, Clone, Copy)]
pub struct StoreDeadline {
    limit: Duration,
}

impl StoreDeadline {
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Await `call`, failing with [`StoreError::Timeout`] once the bound
    /// elapses. The pending call is dropped on expiry.
    pub async fn run<T, F>(&self, store: StoreKind, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                let after_ms = u64::try_from(self.limit.as_millis()).unwrap_or(u64::MAX);
                warn!(store = %store, after_ms, "Store call timed out");
                Err(StoreError::Timeout { store, after_ms })
            }
        }
    }
}

impl Default for StoreDeadline {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_TIMEOUT)
    }
}
