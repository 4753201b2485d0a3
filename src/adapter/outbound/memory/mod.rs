//! In-process store backends.
//!
//! Both ports backed by plain collections behind `parking_lot` locks. Used
//! by tests and by `backend = "memory"` for running without external
//! databases.

mod document;
mod relational;

pub use document::MemoryDocumentStore;
pub use relational::MemoryRelationalStore;
