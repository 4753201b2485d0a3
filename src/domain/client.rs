//! Client record shapes.
//!
//! A create request arrives as a [`ClientDraft`], is validated into a
//! [`ClientRecord`], and is then projected independently into each store:
//! a [`RelationalClientRow`] with a flattened metadata blob and a
//! [`DocumentClientRecord`] with native metadata entries. Callers only ever
//! see a [`PublicClientView`].

use serde::{Deserialize, Serialize};

use super::id::{ClientId, DocumentId, StoreKind};

/// A single metadata key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Unvalidated create payload as received from the boundary.
///
/// Every field is optional so that missing fields surface as validation
/// violations instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub metadata: Option<Vec<MetadataEntry>>,
}

/// Canonical, validated client record.
///
/// Only constructed by [`crate::domain::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub(crate) company_id: i64,
    pub(crate) client_name: String,
    pub(crate) client_email: String,
    pub(crate) metadata: Vec<MetadataEntry>,
}

impl ClientRecord {
    #[must_use]
    pub const fn company_id(&self) -> i64 {
        self.company_id
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Metadata in insertion order.
    #[must_use]
    pub fn metadata(&self) -> &[MetadataEntry] {
        &self.metadata
    }
}

/// Relational projection before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationalClient {
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub metadata_blob: String,
}

/// A row of the relational `clients` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalClientRow {
    pub id: i64,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub metadata_blob: String,
}

impl RelationalClientRow {
    #[must_use]
    pub fn from_new(id: i64, row: NewRelationalClient) -> Self {
        Self {
            id,
            company_id: row.company_id,
            client_name: row.client_name,
            client_email: row.client_email,
            metadata_blob: row.metadata_blob,
        }
    }

    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        ClientId::Relational(self.id)
    }
}

/// A document of the `clients` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentClientRecord {
    pub id: DocumentId,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub metadata: Vec<MetadataEntry>,
}

impl DocumentClientRecord {
    #[must_use]
    pub fn from_record(id: DocumentId, record: &ClientRecord) -> Self {
        Self {
            id,
            company_id: record.company_id,
            client_name: record.client_name.clone(),
            client_email: record.client_email.clone(),
            metadata: record.metadata.clone(),
        }
    }

    /// True if any single entry matches both `key` and `value` exactly.
    #[must_use]
    pub fn has_entry(&self, key: &str, value: &str) -> bool {
        self.metadata
            .iter()
            .any(|entry| entry.key == key && entry.value == value)
    }
}

/// Response shape for relational reads and for create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationalClientView {
    pub id: i64,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    /// The codec-encoded metadata blob, as stored.
    pub metadata: String,
}

/// Response shape for document reads; the native id is rendered as hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentClientView {
    pub id: String,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub metadata: Vec<MetadataEntry>,
}

/// What callers receive, shaped after the store that answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicClientView {
    Relational(RelationalClientView),
    Document(DocumentClientView),
}

impl PublicClientView {
    #[must_use]
    pub const fn store(&self) -> StoreKind {
        match self {
            Self::Relational(_) => StoreKind::Relational,
            Self::Document(_) => StoreKind::Document,
        }
    }

    /// The external id under the common `id` field.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Relational(view) => view.id.to_string(),
            Self::Document(view) => view.id.clone(),
        }
    }

    #[must_use]
    pub const fn company_id(&self) -> i64 {
        match self {
            Self::Relational(view) => view.company_id,
            Self::Document(view) => view.company_id,
        }
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        match self {
            Self::Relational(view) => &view.client_name,
            Self::Document(view) => &view.client_name,
        }
    }

    #[must_use]
    pub fn client_email(&self) -> &str {
        match self {
            Self::Relational(view) => &view.client_email,
            Self::Document(view) => &view.client_email,
        }
    }
}

impl From<RelationalClientRow> for PublicClientView {
    fn from(row: RelationalClientRow) -> Self {
        Self::Relational(RelationalClientView {
            id: row.id,
            company_id: row.company_id,
            client_name: row.client_name,
            client_email: row.client_email,
            metadata: row.metadata_blob,
        })
    }
}

impl From<DocumentClientRecord> for PublicClientView {
    fn from(record: DocumentClientRecord) -> Self {
        Self::Document(DocumentClientView {
            id: record.id.to_hex(),
            company_id: record.company_id,
            client_name: record.client_name,
            client_email: record.client_email,
            metadata: record.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> DocumentClientRecord {
        DocumentClientRecord {
            id: DocumentId::generate(),
            company_id: 1,
            client_name: "Acme".into(),
            client_email: "a@acme.com".into(),
            metadata: vec![
                MetadataEntry::new("tier", "gold"),
                MetadataEntry::new("region", "eu"),
            ],
        }
    }

    #[test]
    fn has_entry_requires_key_and_value_on_one_pair() {
        let record = document();
        assert!(record.has_entry("tier", "gold"));
        assert!(!record.has_entry("tier", "eu"));
        assert!(!record.has_entry("region", "gold"));
    }

    #[test]
    fn document_view_renames_native_id() {
        let record = document();
        let hex = record.id.to_hex();
        let view = PublicClientView::from(record);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], hex);
        assert_eq!(json["metadata"][0]["key"], "tier");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn relational_view_exposes_blob() {
        let row = RelationalClientRow {
            id: 3,
            company_id: 1,
            client_name: "Acme".into(),
            client_email: "a@acme.com".into(),
            metadata_blob: r#"{"metadata":[]}"#.into(),
        };
        let view = PublicClientView::from(row);

        assert_eq!(view.store(), StoreKind::Relational);
        assert_eq!(view.id(), "3");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["metadata"], r#"{"metadata":[]}"#);
    }

    #[test]
    fn draft_accepts_missing_fields() {
        let draft: ClientDraft = serde_json::from_str(r#"{"client_name":"Acme"}"#).unwrap();
        assert_eq!(draft.client_name.as_deref(), Some("Acme"));
        assert!(draft.company_id.is_none());
        assert!(draft.metadata.is_none());
    }
}
