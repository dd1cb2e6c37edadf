//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from configuration files, `USERS_*` environment variables and
//! command-line flags. Every field is optional; accessors supply defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_REQUEST_TIMEOUT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite:mydb.sqlite";
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime settings for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServiceSettings {
    /// TCP address to listen on.
    pub bind_addr: Option<String>,
    /// SQLite connection URL; the file is created when missing.
    pub database_url: Option<String>,
    /// Per-request data access budget in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Budget for reading a request head in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Budget for flushing and closing a connection in seconds.
    pub write_timeout_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub max_connections: Option<u32>,
}

impl ServiceSettings {
    /// Parse the configured listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout_secs
            .map_or(DEFAULT_READ_TIMEOUT, Duration::from_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout_secs
            .map_or(DEFAULT_WRITE_TIMEOUT, Duration::from_secs)
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}
