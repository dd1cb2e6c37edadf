//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use users_service::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
    pub(crate) read_timeout: Duration,
    pub(crate) write_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration with 10 second transport deadlines.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
        }
    }

    /// Deadline for receiving a complete request head.
    #[must_use]
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Deadline for flushing the response and shutting the connection down.
    #[must_use]
    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }
}
