//! HTTP server configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::ConfigError;

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

fn default_api_prefix() -> String {
    "/api".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path prefix mounted in front of every API route.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `bind` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::invalid("server.bind", format!("'{}': {e}", self.bind)))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(ConfigError::invalid(
                "server.api_prefix",
                "must start with '/' and not end with '/'",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_parses() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn rejects_bad_bind() {
        let config = ServerConfig {
            bind: "localhost".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.bind"
        ));
    }

    #[test]
    fn rejects_bad_prefix() {
        for prefix in ["api", "/api/", "/"] {
            let config = ServerConfig {
                api_prefix: prefix.into(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "prefix {prefix:?} accepted");
        }
    }
}
