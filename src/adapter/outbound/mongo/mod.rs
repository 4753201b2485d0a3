//! MongoDB persistence adapter.
//!
//! Implements [`DocumentClientStore`](crate::port::outbound::store::DocumentClientStore)
//! with the official driver. Metadata is stored as a native array of
//! `{key, value}` subdocuments and `client_email` carries a unique index.

pub mod connection;
pub mod document;
pub mod store;

pub use store::MongoClientStore;
