//! Infrastructure configuration modules.

pub mod logging;
pub mod router;
pub mod server;
pub mod settings;
pub mod store;

pub use settings::Config;
