//! HTTP listener configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::ConfigError;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub bind: String,
}

impl ServerConfig {
    /// Parse `bind` as a socket address.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if it is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.bind",
            reason: format!("'{}': {e}", self.bind),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".into(),
        }
    }
}
