//! Dual-write create path.
//!
//! One logical create becomes two physical writes with no shared
//! transaction:
//!
//! ```text
//! ClientDraft --validate--> ClientRecord
//!                               |
//!                               +--> document store insert   (1)
//!                               |
//!                               +--> encode metadata blob
//!                                        |
//!                                        +--> relational insert (2)
//!                                                  |
//!                                                  v
//!                                        relational PublicClientView
//! ```
//!
//! If (2) fails after (1) succeeded the stores have diverged. The divergence
//! is always logged with both ids, and the document is deleted again when
//! compensation is enabled. A timed-out write may still commit later, so a
//! timeout is logged as a possible divergence and never compensated.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::guard::StoreDeadline;
use crate::domain::metadata::encode_for_relational;
use crate::domain::validation::validate;
use crate::domain::{ClientDraft, ClientId, DocumentId, NewRelationalClient, PublicClientView, StoreKind};
use crate::error::{Error, Result, StoreError};
use crate::port::outbound::store::{DocumentClientStore, RelationalClientStore};

/// Writes a validated record into both stores.
pub struct DualWriteCoordinator {
    relational: Arc<dyn RelationalClientStore>,
    document: Arc<dyn DocumentClientStore>,
    deadline: StoreDeadline,
    compensate: bool,
}

impl DualWriteCoordinator {
    pub fn new(
        relational: Arc<dyn RelationalClientStore>,
        document: Arc<dyn DocumentClientStore>,
        deadline: StoreDeadline,
        compensate: bool,
    ) -> Self {
        Self {
            relational,
            document,
            deadline,
            compensate,
        }
    }

    /// Validate `draft`, write it to both stores, and return the relational
    /// view. The document id is not part of the response.
    ///
    /// A store call that times out has an unknown outcome: the write may
    /// still commit after the deadline. Such writes are never compensated.
    ///
    /// # Errors
    /// - [`Error::Validation`] before any write
    /// - [`Error::Store`] if the document write fails. On a timeout the
    ///   document may exist anyway, which is logged.
    /// - [`Error::PartialWrite`] if the relational write fails afterwards
    pub async fn create(&self, draft: ClientDraft) -> Result<PublicClientView> {
        let record = validate(draft)?;
        let client_email = record.client_email();

        let document_id = match self
            .deadline
            .run(StoreKind::Document, self.document.insert(&record))
            .await
        {
            Ok(id) => id,
            Err(source) => {
                if source.is_timeout() {
                    error!(
                        document_id = "unknown",
                        relational_id = "none",
                        client_email,
                        error = %source,
                        "Stores may have diverged: document write timed out and may still commit"
                    );
                }
                return Err(source.into());
            }
        };

        let row = NewRelationalClient {
            company_id: record.company_id(),
            client_name: record.client_name().to_string(),
            client_email: client_email.to_string(),
            metadata_blob: encode_for_relational(record.metadata()),
        };

        match self
            .deadline
            .run(StoreKind::Relational, self.relational.insert(row))
            .await
        {
            Ok(row) => {
                info!(
                    relational_id = %row.client_id().to_tagged(),
                    document_id = %ClientId::from(document_id).to_tagged(),
                    "Client created in both stores"
                );
                Ok(PublicClientView::from(row))
            }
            Err(source) if source.is_timeout() => {
                error!(
                    document_id = %ClientId::from(document_id).to_tagged(),
                    relational_id = "unknown",
                    client_email,
                    error = %source,
                    "Stores may have diverged: relational write timed out and may still commit, document kept"
                );
                Err(Error::PartialWrite {
                    document_id,
                    compensated: false,
                    source,
                })
            }
            Err(source) => Err(self.partial_write(document_id, client_email, source).await),
        }
    }

    async fn partial_write(
        &self,
        document_id: DocumentId,
        client_email: &str,
        source: StoreError,
    ) -> Error {
        let tagged = ClientId::from(document_id).to_tagged();

        if !self.compensate {
            error!(
                document_id = %tagged,
                relational_id = "none",
                client_email,
                error = %source,
                "Stores diverged: document written, relational write failed, compensation disabled"
            );
            return Error::PartialWrite {
                document_id,
                compensated: false,
                source,
            };
        }

        let compensated = match self
            .deadline
            .run(StoreKind::Document, self.document.delete(&document_id))
            .await
        {
            Ok(true) => {
                warn!(
                    document_id = %tagged,
                    relational_id = "none",
                    client_email,
                    error = %source,
                    "Relational write failed; document write rolled back"
                );
                true
            }
            Ok(false) => {
                error!(
                    document_id = %tagged,
                    relational_id = "none",
                    client_email,
                    error = %source,
                    "Relational write failed and the document to roll back was already gone"
                );
                false
            }
            Err(delete_error) => {
                error!(
                    document_id = %tagged,
                    relational_id = "none",
                    client_email,
                    error = %source,
                    compensation_error = %delete_error,
                    "Stores diverged: relational write failed and document rollback failed"
                );
                false
            }
        };

        Error::PartialWrite {
            document_id,
            compensated,
            source,
        }
    }
}
