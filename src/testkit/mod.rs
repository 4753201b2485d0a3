//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`client`] - Builders for create payloads.
//! - [`store`] - Store doubles for failure and timeout paths.
//! - [`config`] - Canonical test configurations.
//! - [`logs`] - Capture of emitted log lines.

pub mod client;
pub mod config;
pub mod logs;
pub mod store;
