//! Store doubles for failure paths.
//!
//! - [`FailingRelationalStore`] - every call returns the configured error
//! - [`StallingStore`] - every call hangs forever, for timeout tests
//! - [`UndeletableDocumentStore`] - an in-memory collection whose deletes fail
//! - [`LateCommitRelationalStore`] - inserts land after the caller gave up

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapter::outbound::memory::{MemoryDocumentStore, MemoryRelationalStore};
use crate::domain::{
    ClientRecord, DocumentClientRecord, DocumentId, MetadataEntry, NewRelationalClient, Page,
    RelationalClientRow, StoreKind,
};
use crate::error::StoreError;
use crate::port::outbound::store::{DocumentClientStore, RelationalClientStore};

/// Relational store that fails every call with the same error.
#[derive(Debug, Clone)]
pub struct FailingRelationalStore {
    error: StoreError,
}

impl FailingRelationalStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }

    /// Fails as if the database were down.
    pub fn unavailable() -> Self {
        Self::new(StoreError::unavailable(
            StoreKind::Relational,
            "connection refused",
        ))
    }
}

#[async_trait]
impl RelationalClientStore for FailingRelationalStore {
    async fn insert(&self, _row: NewRelationalClient) -> Result<RelationalClientRow, StoreError> {
        Err(self.error.clone())
    }

    async fn get(&self, _id: i64) -> Result<Option<RelationalClientRow>, StoreError> {
        Err(self.error.clone())
    }

    async fn list(&self, _page: Page) -> Result<Vec<RelationalClientRow>, StoreError> {
        Err(self.error.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error.clone())
    }
}

/// Store whose calls never complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct StallingStore;

#[async_trait]
impl RelationalClientStore for StallingStore {
    async fn insert(&self, _row: NewRelationalClient) -> Result<RelationalClientRow, StoreError> {
        std::future::pending().await
    }

    async fn get(&self, _id: i64) -> Result<Option<RelationalClientRow>, StoreError> {
        std::future::pending().await
    }

    async fn list(&self, _page: Page) -> Result<Vec<RelationalClientRow>, StoreError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

#[async_trait]
impl DocumentClientStore for StallingStore {
    async fn insert(&self, _record: &ClientRecord) -> Result<DocumentId, StoreError> {
        std::future::pending().await
    }

    async fn get(&self, _id: &DocumentId) -> Result<Option<DocumentClientRecord>, StoreError> {
        std::future::pending().await
    }

    async fn list(
        &self,
        _filter: Option<&MetadataEntry>,
        _page: Page,
    ) -> Result<Vec<DocumentClientRecord>, StoreError> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &DocumentId) -> Result<bool, StoreError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

/// In-memory document store that refuses to delete.
#[derive(Debug, Default)]
pub struct UndeletableDocumentStore {
    inner: MemoryDocumentStore,
}

impl UndeletableDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl DocumentClientStore for UndeletableDocumentStore {
    async fn insert(&self, record: &ClientRecord) -> Result<DocumentId, StoreError> {
        self.inner.insert(record).await
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<DocumentClientRecord>, StoreError> {
        self.inner.get(id).await
    }

    async fn list(
        &self,
        filter: Option<&MetadataEntry>,
        page: Page,
    ) -> Result<Vec<DocumentClientRecord>, StoreError> {
        self.inner.list(filter, page).await
    }

    async fn delete(&self, _id: &DocumentId) -> Result<bool, StoreError> {
        Err(StoreError::backend(StoreKind::Document, "delete rejected"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// In-memory relational store whose inserts run on a detached task and land
/// after `delay`, whether or not anyone is still waiting for them.
#[derive(Debug, Clone)]
pub struct LateCommitRelationalStore {
    inner: Arc<MemoryRelationalStore>,
    delay: Duration,
}

impl LateCommitRelationalStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::new(MemoryRelationalStore::new()),
            delay,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl RelationalClientStore for LateCommitRelationalStore {
    async fn insert(&self, row: NewRelationalClient) -> Result<RelationalClientRow, StoreError> {
        let inner = Arc::clone(&self.inner);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.insert(row).await
        })
        .await
        .map_err(|e| StoreError::backend(StoreKind::Relational, e))?
    }

    async fn get(&self, id: i64) -> Result<Option<RelationalClientRow>, StoreError> {
        self.inner.get(id).await
    }

    async fn list(&self, page: Page) -> Result<Vec<RelationalClientRow>, StoreError> {
        self.inner.list(page).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
