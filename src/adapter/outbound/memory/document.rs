//! In-memory document client store.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{ClientRecord, DocumentClientRecord, DocumentId, MetadataEntry, Page, StoreKind};
use crate::error::StoreError;
use crate::port::outbound::store::DocumentClientStore;

/// In-memory `clients` collection.
///
/// Keeps insertion order, generates object ids, and enforces the same unique
/// `client_email` index the real collection carries.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<Vec<DocumentClientRecord>>,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentClientStore for MemoryDocumentStore {
    async fn insert(&self, record: &ClientRecord) -> Result<DocumentId, StoreError> {
        let mut documents = self.documents.write();
        if documents
            .iter()
            .any(|doc| doc.client_email == record.client_email())
        {
            return Err(StoreError::conflict(
                StoreKind::Document,
                format!("client_email '{}' already exists", record.client_email()),
            ));
        }

        let id = DocumentId::generate();
        documents.push(DocumentClientRecord::from_record(id, record));
        Ok(id)
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<DocumentClientRecord>, StoreError> {
        Ok(self.documents.read().iter().find(|doc| doc.id == *id).cloned())
    }

    async fn list(
        &self,
        filter: Option<&MetadataEntry>,
        page: Page,
    ) -> Result<Vec<DocumentClientRecord>, StoreError> {
        let documents = self.documents.read();
        Ok(documents
            .iter()
            .filter(|doc| filter.map_or(true, |entry| doc.has_entry(&entry.key, &entry.value)))
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, StoreError> {
        let mut documents = self.documents.write();
        let before = documents.len();
        documents.retain(|doc| doc.id != *id);
        Ok(documents.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
