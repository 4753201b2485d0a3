//! MongoDB document client store.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info};

use super::connection::open_client;
use super::document::{id_filter, metadata_filter, MongoClientDoc};
use crate::domain::{ClientRecord, DocumentClientRecord, DocumentId, MetadataEntry, Page, StoreKind};
use crate::error::StoreError;
use crate::port::outbound::store::DocumentClientStore;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed document client store.
#[derive(Clone)]
pub struct MongoClientStore {
    client: Client,
    database: String,
    collection: Collection<MongoClientDoc>,
}

impl MongoClientStore {
    /// Connect to `url` and address `database.collection`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the URI is invalid.
    pub async fn connect(
        url: &str,
        database: &str,
        collection: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = open_client(url, server_selection_timeout).await?;
        let collection = client.database(database).collection(collection);
        Ok(Self {
            client,
            database: database.to_string(),
            collection,
        })
    }
}

fn classify(err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            StoreError::conflict(StoreKind::Document, write.message.clone())
        }
        ErrorKind::Command(command) if command.code == DUPLICATE_KEY => {
            StoreError::conflict(StoreKind::Document, command.message.clone())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::unavailable(StoreKind::Document, err.to_string()),
        _ => StoreError::backend(StoreKind::Document, err.to_string()),
    }
}

#[async_trait]
impl DocumentClientStore for MongoClientStore {
    async fn insert(&self, record: &ClientRecord) -> Result<DocumentId, StoreError> {
        let result = self
            .collection
            .insert_one(MongoClientDoc::from(record), None)
            .await
            .map_err(classify)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::backend(StoreKind::Document, "inserted _id is not an ObjectId")
        })?;
        debug!(id = %id, client_email = record.client_email(), "Inserted document client");
        Ok(DocumentId::from(id))
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<DocumentClientRecord>, StoreError> {
        self.collection
            .find_one(id_filter(id), None)
            .await
            .map_err(classify)?
            .map(DocumentClientRecord::try_from)
            .transpose()
    }

    async fn list(
        &self,
        filter: Option<&MetadataEntry>,
        page: Page,
    ) -> Result<Vec<DocumentClientRecord>, StoreError> {
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(page.offset)
            .limit(i64::try_from(page.limit).unwrap_or(i64::MAX))
            .build();

        let docs: Vec<MongoClientDoc> = self
            .collection
            .find(metadata_filter(filter), options)
            .await
            .map_err(classify)?
            .try_collect()
            .await
            .map_err(classify)?;

        docs.into_iter().map(DocumentClientRecord::try_from).collect()
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id), None)
            .await
            .map_err(classify)?;
        Ok(result.deleted_count > 0)
    }

    async fn init(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "client_email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let created = self
            .collection
            .create_index(index, None)
            .await
            .map_err(classify)?;
        info!(
            collection = self.collection.name(),
            index = %created.index_name,
            "Document store unique email index ready"
        );
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        debug!("Document store client shut down");
    }
}
