//! In-memory relational client store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{NewRelationalClient, Page, RelationalClientRow, StoreKind};
use crate::error::StoreError;
use crate::port::outbound::store::RelationalClientStore;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, RelationalClientRow>,
}

/// In-memory `clients` table with auto-increment ids and a unique email column.
#[derive(Debug, Default)]
pub struct MemoryRelationalStore {
    table: RwLock<Table>,
}

impl MemoryRelationalStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RelationalClientStore for MemoryRelationalStore {
    async fn insert(&self, row: NewRelationalClient) -> Result<RelationalClientRow, StoreError> {
        let mut table = self.table.write();
        if table
            .rows
            .values()
            .any(|existing| existing.client_email == row.client_email)
        {
            return Err(StoreError::conflict(
                StoreKind::Relational,
                format!("client_email '{}' already exists", row.client_email),
            ));
        }

        table.next_id += 1;
        let id = table.next_id;
        let stored = RelationalClientRow::from_new(id, row);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Option<RelationalClientRow>, StoreError> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<RelationalClientRow>, StoreError> {
        let table = self.table.read();
        Ok(table
            .rows
            .values()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
