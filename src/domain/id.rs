//! Store selection and client identifiers.
//!
//! The relational store addresses rows by an integer primary key, the
//! document store by a native object id. Callers always name the store they
//! are addressing; an id minted by one store is never looked up in the other.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::error::IdentifierError;

/// Which backing store a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Fixed-schema store keyed by integer id.
    Relational,
    /// Schemaless store keyed by object id.
    Document,
}

impl StoreKind {
    /// Map the boundary's `use_sql_database` flag onto a store.
    #[must_use]
    pub const fn from_sql_flag(use_sql_database: bool) -> Self {
        if use_sql_database {
            Self::Relational
        } else {
            Self::Document
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-store identifier.
///
/// Wraps the driver's object id so the rest of the crate never has to know
/// how the document store encodes identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Mint a fresh identifier, as the document store would on insert.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the canonical 24-hex-digit form.
    ///
    /// # Errors
    /// Returns [`IdentifierError::MalformedObjectId`] for any other shape.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| IdentifierError::MalformedObjectId { raw: raw.to_string() })
    }

    #[must_use]
    pub const fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Canonical lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for DocumentId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// A native identifier paired with the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientId {
    Relational(i64),
    Document(DocumentId),
}

impl ClientId {
    /// Translate an external id string into the native id of `store`.
    ///
    /// # Errors
    /// Returns an [`IdentifierError`] when `raw` does not follow the id
    /// grammar of `store`. This is distinct from the record being absent.
    pub fn parse(raw: &str, store: StoreKind) -> Result<Self, IdentifierError> {
        match store {
            StoreKind::Relational => raw
                .parse::<i64>()
                .map(Self::Relational)
                .map_err(|_| IdentifierError::NotAnInteger { raw: raw.to_string() }),
            StoreKind::Document => DocumentId::parse(raw).map(Self::Document),
        }
    }

    #[must_use]
    pub const fn store(&self) -> StoreKind {
        match self {
            Self::Relational(_) => StoreKind::Relational,
            Self::Document(_) => StoreKind::Document,
        }
    }

    /// The externally visible id: decimal for relational rows, hex for documents.
    #[must_use]
    pub fn to_external(&self) -> String {
        match self {
            Self::Relational(id) => id.to_string(),
            Self::Document(id) => id.to_hex(),
        }
    }

    /// `store:native` form, unambiguous across both stores.
    #[must_use]
    pub fn to_tagged(&self) -> String {
        format!("{}:{}", self.store(), self.to_external())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_external())
    }
}

impl From<DocumentId> for ClientId {
    fn from(id: DocumentId) -> Self {
        Self::Document(id)
    }
}
