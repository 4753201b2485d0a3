//! Persistence ports for the two client stores.
//!
//! The relational and document stores have different identity schemes and
//! metadata representations, so each gets its own trait rather than a
//! lowest-common-denominator one.

use async_trait::async_trait;

use crate::domain::{
    ClientRecord, DocumentClientRecord, DocumentId, MetadataEntry, NewRelationalClient, Page,
    RelationalClientRow,
};
use crate::error::StoreError;

/// Storage operations for the fixed-schema `clients` table.
#[async_trait]
pub trait RelationalClientStore: Send + Sync {
    /// Insert a row and return it with its store-assigned id.
    async fn insert(&self, row: NewRelationalClient) -> Result<RelationalClientRow, StoreError>;

    /// Get a row by primary key.
    async fn get(&self, id: i64) -> Result<Option<RelationalClientRow>, StoreError>;

    /// Scan rows in id order within `page`.
    async fn list(&self, page: Page) -> Result<Vec<RelationalClientRow>, StoreError>;

    /// Prepare the store for use (create the table if missing).
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Cheap round-trip to confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release pooled connections.
    async fn close(&self) {}
}

/// Storage operations for the schemaless `clients` collection.
#[async_trait]
pub trait DocumentClientStore: Send + Sync {
    /// Insert a record and return its store-assigned id.
    ///
    /// Fails with [`StoreError::Conflict`] if `client_email` is already taken.
    async fn insert(&self, record: &ClientRecord) -> Result<DocumentId, StoreError>;

    /// Get a record by object id.
    async fn get(&self, id: &DocumentId) -> Result<Option<DocumentClientRecord>, StoreError>;

    /// Scan records within `page`, keeping only those with an entry equal to
    /// `filter` when one is given.
    async fn list(
        &self,
        filter: Option<&MetadataEntry>,
        page: Page,
    ) -> Result<Vec<DocumentClientRecord>, StoreError>;

    /// Delete a record. Returns whether one was removed.
    async fn delete(&self, id: &DocumentId) -> Result<bool, StoreError>;

    /// Prepare the store for use (unique index on `client_email`).
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Cheap round-trip to confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Shut down the driver's connection pool.
    async fn close(&self) {}
}
