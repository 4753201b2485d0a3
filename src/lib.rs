//! clientdb - client records stored redundantly in a relational and a
//! document store.
//!
//! Every create is written to both stores; every read names the store it
//! targets and gets back that store's shape of the record.
//!
//! # Architecture
//!
//! - **`domain`** - Store-agnostic types: drafts, validated records, ids,
//!   the metadata codec, and listing parameters
//! - **`port`** - Traits for the two stores
//! - **`application`** - The dual-write coordinator and the query router
//!   behind a single `ClientService`
//! - **`adapter`** - SQLite, MongoDB and in-memory stores; the axum HTTP API
//!   and the clap CLI
//! - **`infrastructure`** - TOML configuration and store wiring
//!
//! # Features
//!
//! - `testkit` - Export store doubles and fixtures for integration tests
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use clientdb::adapter::outbound::memory::{MemoryDocumentStore, MemoryRelationalStore};
//! use clientdb::application::client::{ClientService, ClientServiceConfig};
//! use clientdb::domain::{ClientDraft, MetadataEntry, StoreKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ClientService::new(
//!     Arc::new(MemoryRelationalStore::new()),
//!     Arc::new(MemoryDocumentStore::new()),
//!     ClientServiceConfig::default(),
//! );
//!
//! let created = service
//!     .create(ClientDraft {
//!         company_id: Some(1),
//!         client_name: Some("Acme".into()),
//!         client_email: Some("a@acme.com".into()),
//!         metadata: Some(vec![MetadataEntry::new("tier", "gold")]),
//!     })
//!     .await
//!     .unwrap();
//!
//! let fetched = service.get(&created.id(), StoreKind::Relational).await.unwrap();
//! assert_eq!(fetched, created);
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
