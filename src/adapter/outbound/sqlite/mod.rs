//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`RelationalClientStore`](crate::port::outbound::store::RelationalClientStore)
//! using Diesel ORM with an r2d2 connection pool and embedded migrations.

pub mod database;
pub mod store;

pub use store::SqliteClientStore;
