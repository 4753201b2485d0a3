//! BSON shape of the `clients` collection.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::domain::{ClientRecord, DocumentClientRecord, DocumentId, MetadataEntry, StoreKind};
use crate::error::StoreError;

/// A stored client document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoClientDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl From<&ClientRecord> for MongoClientDoc {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: None,
            company_id: record.company_id(),
            client_name: record.client_name().to_string(),
            client_email: record.client_email().to_string(),
            metadata: record.metadata().to_vec(),
        }
    }
}

impl TryFrom<MongoClientDoc> for DocumentClientRecord {
    type Error = StoreError;

    fn try_from(doc: MongoClientDoc) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| StoreError::backend(StoreKind::Document, "document has no _id"))?;
        Ok(Self {
            id: DocumentId::from(id),
            company_id: doc.company_id,
            client_name: doc.client_name,
            client_email: doc.client_email,
            metadata: doc.metadata,
        })
    }
}

/// Query matching documents that carry `entry` as a single metadata element.
///
/// `$elemMatch` keeps key and value on the same element; matching them as
/// two independent paths would accept a key from one entry and a value from
/// another.
#[must_use]
pub fn metadata_filter(entry: Option<&MetadataEntry>) -> Document {
    match entry {
        Some(entry) => doc! {
            "metadata": {
                "$elemMatch": { "key": entry.key.as_str(), "value": entry.value.as_str() }
            }
        },
        None => Document::new(),
    }
}

/// Query matching a single document by id.
#[must_use]
pub fn id_filter(id: &DocumentId) -> Document {
    doc! { "_id": id.object_id() }
}
