//! Read path: one store per request, chosen by the caller.

use std::sync::Arc;

use tracing::debug;

use super::guard::StoreDeadline;
use crate::domain::{ClientId, ListRequest, PublicClientView, StoreKind};
use crate::error::{Error, Result};
use crate::port::outbound::store::{DocumentClientStore, RelationalClientStore};

/// Routes reads to the relational or document store and normalizes the
/// result into [`PublicClientView`].
pub struct QueryRouter {
    relational: Arc<dyn RelationalClientStore>,
    document: Arc<dyn DocumentClientStore>,
    deadline: StoreDeadline,
}

impl QueryRouter {
    pub fn new(
        relational: Arc<dyn RelationalClientStore>,
        document: Arc<dyn DocumentClientStore>,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            relational,
            document,
            deadline,
        }
    }

    /// List clients from the store selected by `request`.
    ///
    /// The relational path scans by id and does not apply metadata filters.
    /// The document path applies the filter only when both key and value are
    /// present.
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<PublicClientView>> {
        if request.page.is_empty() {
            return Ok(Vec::new());
        }

        match request.store() {
            StoreKind::Relational => {
                if request.metadata_key.is_some() || request.metadata_value.is_some() {
                    debug!(
                        metadata_key = request.metadata_key.as_deref(),
                        metadata_value = request.metadata_value.as_deref(),
                        "Metadata filter ignored for relational listing"
                    );
                }
                let rows = self
                    .deadline
                    .run(StoreKind::Relational, self.relational.list(request.page))
                    .await?;
                Ok(rows.into_iter().map(PublicClientView::from).collect())
            }
            StoreKind::Document => {
                let filter = request.metadata_filter();
                let records = self
                    .deadline
                    .run(
                        StoreKind::Document,
                        self.document.list(filter.as_ref(), request.page),
                    )
                    .await?;
                Ok(records.into_iter().map(PublicClientView::from).collect())
            }
        }
    }

    /// Fetch one client by its external id in `store`.
    ///
    /// # Errors
    /// - [`Error::InvalidIdentifier`] if `raw_id` does not fit the store's
    ///   id grammar (no store access happens)
    /// - [`Error::NotFound`] if the id is well formed but unknown
    pub async fn get(&self, raw_id: &str, store: StoreKind) -> Result<PublicClientView> {
        let view = match ClientId::parse(raw_id, store)? {
            ClientId::Relational(id) => self
                .deadline
                .run(StoreKind::Relational, self.relational.get(id))
                .await?
                .map(PublicClientView::from),
            ClientId::Document(id) => self
                .deadline
                .run(StoreKind::Document, self.document.get(&id))
                .await?
                .map(PublicClientView::from),
        };

        view.ok_or_else(|| Error::NotFound {
            store,
            id: raw_id.to_string(),
        })
    }
}
