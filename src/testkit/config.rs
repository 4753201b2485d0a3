//! Canonical test configurations.

use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::{DocumentBackend, RelationalBackend};

/// Config with both stores in memory and a short store timeout.
pub fn memory_config() -> Config {
    let mut config = Config::default();
    config.relational.backend = RelationalBackend::Memory;
    config.document.backend = DocumentBackend::Memory;
    config.router.store_timeout_ms = 1000;
    config
}

/// TOML equivalent of [`memory_config`], for tests that go through a file.
pub const MEMORY_CONFIG_TOML: &str = r#"
[server]
bind = "127.0.0.1:0"

[relational]
backend = "memory"

[document]
backend = "memory"

[router]
store_timeout_ms = 1000
"#;
