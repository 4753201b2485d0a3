//! Client use cases over the two stores.
//!
//! [`ClientService`] is the single entry point handed to inbound adapters.
//! It owns both store handles for the life of the process and delegates
//! writes to [`DualWriteCoordinator`] and reads to [`QueryRouter`].

pub mod coordinator;
pub mod guard;
pub mod health;
pub mod router;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

pub use coordinator::DualWriteCoordinator;
pub use guard::{StoreDeadline, DEFAULT_STORE_TIMEOUT};
pub use health::{HealthReport, StoreStatus};
pub use router::QueryRouter;

use crate::domain::{ClientDraft, ListRequest, PublicClientView, StoreKind};
use crate::error::{Result, StoreError};
use crate::port::outbound::store::{DocumentClientStore, RelationalClientStore};

/// Policy knobs for [`ClientService`].
#[derive(Debug, Clone, Copy)]
pub struct ClientServiceConfig {
    /// Bound on every individual store call.
    pub store_timeout: Duration,
    /// Delete the document again when the relational write fails.
    pub compensate_partial_writes: bool,
}

impl Default for ClientServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
            compensate_partial_writes: true,
        }
    }
}

/// Create, list and get clients across the relational and document stores.
pub struct ClientService {
    relational: Arc<dyn RelationalClientStore>,
    document: Arc<dyn DocumentClientStore>,
    coordinator: DualWriteCoordinator,
    router: QueryRouter,
    deadline: StoreDeadline,
}

impl ClientService {
    pub fn new(
        relational: Arc<dyn RelationalClientStore>,
        document: Arc<dyn DocumentClientStore>,
        config: ClientServiceConfig,
    ) -> Self {
        let deadline = StoreDeadline::new(config.store_timeout);
        Self {
            coordinator: DualWriteCoordinator::new(
                Arc::clone(&relational),
                Arc::clone(&document),
                deadline,
                config.compensate_partial_writes,
            ),
            router: QueryRouter::new(Arc::clone(&relational), Arc::clone(&document), deadline),
            relational,
            document,
            deadline,
        }
    }

    /// Prepare both stores (relational table, document unique index).
    ///
    /// Not bounded by the per-call deadline.
    pub async fn init(&self) -> std::result::Result<(), StoreError> {
        self.relational.init().await?;
        self.document.init().await?;
        info!("Stores initialized");
        Ok(())
    }

    /// Release both stores' connections.
    pub async fn close(&self) {
        self.relational.close().await;
        self.document.close().await;
        info!("Stores closed");
    }

    #[instrument(skip_all, fields(client_email = draft.client_email.as_deref()))]
    pub async fn create(&self, draft: ClientDraft) -> Result<PublicClientView> {
        self.coordinator.create(draft).await
    }

    #[instrument(skip_all, fields(store = %request.store(), offset = request.page.offset, limit = request.page.limit))]
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<PublicClientView>> {
        self.router.list(request).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, client_id: &str, store: StoreKind) -> Result<PublicClientView> {
        self.router.get(client_id, store).await
    }

    /// Ping both stores concurrently.
    pub async fn health(&self) -> HealthReport {
        let (relational, document) = tokio::join!(
            self.deadline
                .run(StoreKind::Relational, self.relational.ping()),
            self.deadline.run(StoreKind::Document, self.document.ping()),
        );
        HealthReport {
            relational: StoreStatus::from_ping(StoreKind::Relational, relational),
            document: StoreStatus::from_ping(StoreKind::Document, document),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::{MemoryDocumentStore, MemoryRelationalStore};
    use crate::domain::Page;
    use crate::testkit::client::acme_draft;
    use crate::testkit::store::{FailingRelationalStore, StallingStore};

    fn memory_service() -> ClientService {
        ClientService::new(
            Arc::new(MemoryRelationalStore::new()),
            Arc::new(MemoryDocumentStore::new()),
            ClientServiceConfig::default(),
        )
    }

    #[tokio::test]
    async fn create_then_read_from_both_stores() {
        let service = memory_service();
        service.init().await.unwrap();

        let created = service.create(acme_draft()).await.unwrap();
        assert_eq!(created.store(), StoreKind::Relational);

        let relational = service
            .get(&created.id(), StoreKind::Relational)
            .await
            .unwrap();
        assert_eq!(relational, created);

        let documents = service
            .list(&ListRequest {
                use_sql_database: false,
                metadata_key: Some("tier".into()),
                metadata_value: Some("gold".into()),
                page: Page::default(),
            })
            .await
            .unwrap();
        assert_eq!(documents.len(), 1);

        let document = service
            .get(&documents[0].id(), StoreKind::Document)
            .await
            .unwrap();
        assert_eq!(document.company_id(), 1);
        assert_eq!(document.client_name(), "Acme");
        assert_eq!(document.client_email(), "a@acme.com");

        service.close().await;
    }

    #[tokio::test]
    async fn health_reports_each_store() {
        assert!(memory_service().health().await.is_healthy());

        let service = ClientService::new(
            Arc::new(FailingRelationalStore::unavailable()),
            Arc::new(StallingStore),
            ClientServiceConfig {
                store_timeout: Duration::from_millis(20),
                compensate_partial_writes: true,
            },
        );
        let report = service.health().await;
        assert!(!report.is_healthy());
        assert!(!report.relational.reachable);
        assert!(!report.document.reachable);
        assert!(report.document.error.unwrap().contains("did not respond"));
    }
}
