//! Configuration for the NATS bus connection.

use std::time::Duration;

use herald_core::Config;
use herald_core::config::{BUS_TIMEOUT, CLIENT_NAME, RECONNECT_WAIT};

/// Configuration for the bus connection.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// NATS server URL.
    pub url: String,
    /// Client name announced to the server.
    pub client_name: String,
    /// Bound on each connection attempt.
    pub connection_timeout: Duration,
    /// Bound on the startup flush round-trip.
    pub flush_timeout: Duration,
    /// Wait between reconnection attempts.
    pub reconnect_wait: Duration,
}

impl BusConfig {
    /// Create a new config for a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_name: CLIENT_NAME.to_string(),
            connection_timeout: BUS_TIMEOUT,
            flush_timeout: BUS_TIMEOUT,
            reconnect_wait: RECONNECT_WAIT,
        }
    }

    /// Derive the bus config from the process configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.bus_url)
    }

    /// Set the client name.
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Set the per-attempt connection timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set the startup flush bound.
    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    /// Set the wait between reconnection attempts.
    pub fn with_reconnect_wait(mut self, wait: Duration) -> Self {
        self.reconnect_wait = wait;
        self
    }
}
