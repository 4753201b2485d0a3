use thiserror::Error;

use crate::domain::error::{IdentifierError, MetadataError, ValidationError};
use crate::domain::id::{DocumentId, StoreKind};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection or transport failure.
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: StoreKind, reason: String },

    /// The call did not complete within the configured bound.
    #[error("{store} store did not respond within {after_ms} ms")]
    Timeout { store: StoreKind, after_ms: u64 },

    /// A uniqueness constraint rejected the write.
    #[error("{store} store rejected a duplicate: {reason}")]
    Conflict { store: StoreKind, reason: String },

    /// Any other failure inside the store or its driver.
    #[error("{store} store error: {reason}")]
    Backend { store: StoreKind, reason: String },
}

impl StoreError {
    pub fn unavailable(store: StoreKind, reason: impl ToString) -> Self {
        Self::Unavailable {
            store,
            reason: reason.to_string(),
        }
    }

    pub fn backend(store: StoreKind, reason: impl ToString) -> Self {
        Self::Backend {
            store,
            reason: reason.to_string(),
        }
    }

    pub fn conflict(store: StoreKind, reason: impl ToString) -> Self {
        Self::Conflict {
            store,
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> StoreKind {
        match self {
            Self::Unavailable { store, .. }
            | Self::Timeout { store, .. }
            | Self::Conflict { store, .. }
            | Self::Backend { store, .. } => *store,
        }
    }

    /// Whether the call was abandoned by its caller. The store may still
    /// complete it afterwards.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the failure means the store could not be reached in time.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("client {id} not found in the {store} store")]
    NotFound { store: StoreKind, id: String },

    #[error(transparent)]
    MalformedMetadata(#[from] MetadataError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The document write landed but the relational write did not.
    #[error(
        "partial write: document {document_id} stored but relational write failed ({source}); compensated: {compensated}"
    )]
    PartialWrite {
        document_id: DocumentId,
        compensated: bool,
        #[source]
        source: StoreError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
