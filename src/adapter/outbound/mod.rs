//! Outbound adapters (driven side).

pub mod memory;
pub mod mongo;
pub mod sqlite;
