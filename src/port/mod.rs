//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the client service and the systems it
//! drives. The application layer talks to both stores exclusively through
//! these traits; adapters provide the concrete backends.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  coordinator + router   ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                    ┌──────────────┐
//! │  Relational  │                                    │   Document   │
//! │ store adapter│                                    │ store adapter│
//! │ (sqlite/mem) │                                    │ (mongo/mem)  │
//! └──────────────┘                                    └──────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::store::RelationalClientStore`] - Integer-keyed table of client rows
//! - [`outbound::store::DocumentClientStore`] - Object-id-keyed collection of client documents

pub mod outbound;
