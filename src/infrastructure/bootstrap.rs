//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! Builds the two process-scoped store handles from configuration and hands
//! them to a [`ClientService`]. Nothing here is global: callers own the
//! service and decide when to init and close it.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::memory::{MemoryDocumentStore, MemoryRelationalStore};
use crate::adapter::outbound::mongo::MongoClientStore;
use crate::adapter::outbound::sqlite::SqliteClientStore;
use crate::application::client::{ClientService, ClientServiceConfig};
use crate::error::StoreError;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::{
    DocumentBackend, DocumentConfig, RelationalBackend, RelationalConfig,
};
use crate::port::outbound::store::{DocumentClientStore, RelationalClientStore};

/// Build the relational store selected by `config`. SQLite lock waits and
/// pool checkout are sized to finish inside `store_timeout`.
///
/// # Errors
/// Returns [`StoreError::Unavailable`] if the SQLite pool cannot be opened.
pub fn build_relational_store(
    config: &RelationalConfig,
    store_timeout: Duration,
) -> Result<Arc<dyn RelationalClientStore>, StoreError> {
    match config.backend {
        RelationalBackend::Sqlite => {
            info!(url = %config.url, pool_size = config.pool_size, "Opening SQLite relational store");
            Ok(Arc::new(SqliteClientStore::connect(
                &config.url,
                config.pool_size,
                store_timeout,
            )?))
        }
        RelationalBackend::Memory => {
            info!("Using in-memory relational store");
            Ok(Arc::new(MemoryRelationalStore::new()))
        }
    }
}

/// Build the document store selected by `config`.
///
/// # Errors
/// Returns [`StoreError::Unavailable`] if the MongoDB URI is invalid.
pub async fn build_document_store(
    config: &DocumentConfig,
    server_selection_timeout: Duration,
) -> Result<Arc<dyn DocumentClientStore>, StoreError> {
    match config.backend {
        DocumentBackend::Mongodb => {
            info!(
                database = %config.database,
                collection = %config.collection,
                "Connecting MongoDB document store"
            );
            Ok(Arc::new(
                MongoClientStore::connect(
                    &config.url,
                    &config.database,
                    &config.collection,
                    server_selection_timeout,
                )
                .await?,
            ))
        }
        DocumentBackend::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

/// Build both stores and wrap them in a [`ClientService`].
///
/// The stores are not initialized; call [`ClientService::init`].
///
/// # Errors
/// Returns the first store construction failure.
pub async fn build_service(config: &Config) -> Result<ClientService, StoreError> {
    let store_timeout = config.router.store_timeout();
    let relational = build_relational_store(&config.relational, store_timeout)?;
    let document = build_document_store(&config.document, store_timeout).await?;
    Ok(ClientService::new(
        relational,
        document,
        ClientServiceConfig::from(&config.router),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoreKind;
    use crate::testkit::client::acme_draft;
    use crate::testkit::config::memory_config;

    #[tokio::test]
    async fn memory_backends_build_and_serve() {
        let service = build_service(&memory_config()).await.unwrap();
        service.init().await.unwrap();

        let created = service.create(acme_draft()).await.unwrap();
        assert_eq!(created.store(), StoreKind::Relational);
        assert!(service.health().await.is_healthy());
        service.close().await;
    }

    #[tokio::test]
    async fn sqlite_backend_initializes_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config();
        config.relational.backend = RelationalBackend::Sqlite;
        config.relational.url = dir.path().join("clients.db").display().to_string();

        let service = build_service(&config).await.unwrap();
        service.init().await.unwrap();

        let created = service.create(acme_draft()).await.unwrap();
        let fetched = service
            .get(&created.id(), StoreKind::Relational)
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }
}
