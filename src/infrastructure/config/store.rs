//! Backing store configuration.

use serde::Deserialize;

/// Which implementation backs the relational store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationalBackend {
    /// SQLite file (or `:memory:`) through Diesel.
    #[default]
    Sqlite,
    /// In-process table; nothing persists.
    Memory,
}

/// Which implementation backs the document store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentBackend {
    /// MongoDB server.
    #[default]
    Mongodb,
    /// In-process collection; nothing persists.
    Memory,
}

/// Relational store settings.
///
/// `url` is replaced by `SQL_URI` when that variable is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelationalConfig {
    pub backend: RelationalBackend,
    /// Database path for SQLite.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for RelationalConfig {
    fn default() -> Self {
        Self {
            backend: RelationalBackend::Sqlite,
            url: "clientdb.db".into(),
            pool_size: 8,
        }
    }
}

/// Document store settings.
///
/// `url` is replaced by `MONGODB_URI` when that variable is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub backend: DocumentBackend,
    /// Connection string.
    pub url: String,
    pub database: String,
    pub collection: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            backend: DocumentBackend::Mongodb,
            url: "mongodb://localhost:27017".into(),
            database: "clientdb".into(),
            collection: "clients".into(),
        }
    }
}
