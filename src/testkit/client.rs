//! Builders for client payloads used across tests.

use crate::domain::{ClientDraft, MetadataEntry};

/// A complete draft.
pub fn draft(
    company_id: i64,
    client_name: &str,
    client_email: &str,
    metadata: Vec<MetadataEntry>,
) -> ClientDraft {
    ClientDraft {
        company_id: Some(company_id),
        client_name: Some(client_name.to_string()),
        client_email: Some(client_email.to_string()),
        metadata: Some(metadata),
    }
}

/// The Acme client with a single `tier = gold` entry.
pub fn acme_draft() -> ClientDraft {
    draft(
        1,
        "Acme",
        "a@acme.com",
        vec![MetadataEntry::new("tier", "gold")],
    )
}

/// The Acme draft with a different email.
pub fn draft_with_email(client_email: &str) -> ClientDraft {
    ClientDraft {
        client_email: Some(client_email.to_string()),
        ..acme_draft()
    }
}

/// JSON body for `POST /client/` matching [`acme_draft`].
pub fn acme_json() -> serde_json::Value {
    serde_json::json!({
        "company_id": 1,
        "client_name": "Acme",
        "client_email": "a@acme.com",
        "metadata": [{ "key": "tier", "value": "gold" }]
    })
}
