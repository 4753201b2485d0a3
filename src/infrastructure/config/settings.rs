//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file, then `SQL_URI` and `MONGODB_URI`
//! override the store connection strings, then the result is validated.
//!
//! # Example
//!
//! ```no_run
//! use clientdb::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::router::RouterConfig;
use super::server::ServerConfig;
use super::store::{DocumentBackend, DocumentConfig, RelationalBackend, RelationalConfig};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `relational.url`.
pub const SQL_URI_ENV: &str = "SQL_URI";
/// Environment variable overriding `document.url`.
pub const MONGODB_URI_ENV: &str = "MONGODB_URI";

/// Main application configuration.
///
/// Every section is optional in the file and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub relational: RelationalConfig,
    pub document: DocumentConfig,
    pub router: RouterConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |name| std::env::var(name).ok())
    }

    /// Parse configuration from TOML content, resolving overrides through
    /// `lookup` instead of the process environment.
    ///
    /// # Errors
    /// Same as [`Config::parse_toml`].
    pub fn parse_toml_with_env<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SQL_URI_ENV).filter(|v| !v.is_empty()) {
            self.relational.url = url;
        }
        if let Some(url) = lookup(MONGODB_URI_ENV).filter(|v| !v.is_empty()) {
            self.document.url = url;
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.relational.backend == RelationalBackend::Sqlite {
            if self.relational.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "relational.url",
                }
                .into());
            }
            if self.relational.pool_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "relational.pool_size",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.document.backend == DocumentBackend::Mongodb {
            if self.document.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "document.url",
                }
                .into());
            }
            if self.document.database.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "document.database",
                }
                .into());
            }
            if self.document.collection.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "document.collection",
                }
                .into());
            }
        }

        if self.router.store_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "router.store_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml_with_env("", no_env).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.relational.backend, RelationalBackend::Sqlite);
        assert_eq!(config.relational.url, "clientdb.db");
        assert_eq!(config.document.backend, DocumentBackend::Mongodb);
        assert_eq!(config.document.collection, "clients");
        assert_eq!(config.router.store_timeout_ms, 5000);
        assert!(config.router.compensate_partial_writes);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn env_overrides_replace_urls() {
        let toml = r#"
            [relational]
            url = "from-file.db"

            [document]
            url = "mongodb://file:27017"
        "#;
        let config = Config::parse_toml_with_env(toml, |name| match name {
            SQL_URI_ENV => Some("/var/lib/clients.db".to_string()),
            MONGODB_URI_ENV => Some("mongodb://env:27017".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.relational.url, "/var/lib/clients.db");
        assert_eq!(config.document.url, "mongodb://env:27017");
    }

    #[test]
    fn empty_env_override_is_ignored() {
        let config = Config::parse_toml_with_env("", |_| Some(String::new())).unwrap();
        assert_eq!(config.relational.url, "clientdb.db");
    }

    #[test]
    fn memory_backends_skip_url_checks() {
        let toml = r#"
            [relational]
            backend = "memory"
            url = ""

            [document]
            backend = "memory"
            url = ""
        "#;
        let config = Config::parse_toml_with_env(toml, no_env).unwrap();
        assert_eq!(config.relational.backend, RelationalBackend::Memory);
        assert_eq!(config.document.backend, DocumentBackend::Memory);
    }

    #[test]
    fn rejects_missing_sqlite_url() {
        let toml = "[relational]\nurl = \"  \"\n";
        let err = Config::parse_toml_with_env(toml, no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "relational.url"
            })
        ));
    }

    #[test]
    fn rejects_zero_timeout_and_pool() {
        let err = Config::parse_toml_with_env("[router]\nstore_timeout_ms = 0\n", no_env)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "router.store_timeout_ms",
                ..
            })
        ));

        let err =
            Config::parse_toml_with_env("[relational]\npool_size = 0\n", no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "relational.pool_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_bind_and_log_format() {
        let err = Config::parse_toml_with_env("[server]\nbind = \"nowhere\"\n", no_env)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "server.bind",
                ..
            })
        ));

        let err = Config::parse_toml_with_env("[logging]\nformat = \"xml\"\n", no_env)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = Config::parse_toml_with_env("[document]\nbackend = \"couch\"\n", no_env)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
