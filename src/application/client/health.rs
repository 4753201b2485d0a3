//! Store reachability report.

use serde::Serialize;

use crate::domain::StoreKind;
use crate::error::StoreError;

/// Result of pinging one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub store: StoreKind,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreStatus {
    pub fn from_ping(store: StoreKind, result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self {
                store,
                reachable: true,
                error: None,
            },
            Err(e) => Self {
                store,
                reachable: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Reachability of both stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub relational: StoreStatus,
    pub document: StoreStatus,
}

impl HealthReport {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.relational.reachable && self.document.reachable
    }
}
