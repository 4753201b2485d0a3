//! Store-agnostic client types.
//!
//! - [`client`] - Drafts, validated records, per-store projections and views
//! - [`id`] - Store selection and identifier translation
//! - [`metadata`] - Codec between native metadata and the relational blob
//! - [`validation`] - Field checks run before any write
//! - [`query`] - Listing and pagination parameters
//! - [`error`] - Errors raised without touching a store

pub mod client;
pub mod error;
pub mod id;
pub mod metadata;
pub mod query;
pub mod validation;

pub use client::{
    ClientDraft, ClientRecord, DocumentClientRecord, DocumentClientView, MetadataEntry,
    NewRelationalClient, PublicClientView, RelationalClientRow, RelationalClientView,
};
pub use id::{ClientId, DocumentId, StoreKind};
pub use query::{ListRequest, Page, MAX_PAGE_LIMIT};
