//! Bus connection lifecycle.
//!
//! The connection owns an explicit state machine
//! (`Disconnected → Connecting → Connected`, on link loss
//! `Connected → Reconnecting → Connected`) published through a watch channel
//! so that the health surface can derive readiness without touching the
//! client. Reconnection runs indefinitely; only a malformed address is fatal.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_nats::Event as ClientEvent;
use herald_core::{Error, Result};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::BusConfig;
use crate::metrics::BusMetrics;
use crate::policy::ReconnectPolicy;

/// Connection state, mutated only by the connection's event callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
        };
        f.write_str(name)
    }
}

/// Long-lived handle to the NATS connection.
#[derive(Clone)]
pub struct BusConnection {
    client: async_nats::Client,
    state_rx: watch::Receiver<ConnectionState>,
    metrics: Arc<BusMetrics>,
}

impl BusConnection {
    /// Connect to the bus.
    ///
    /// The initial attempt is retried indefinitely rather than failing fast;
    /// only a non-recoverable setup error (e.g. a malformed address) returns
    /// an error. The injected policy controls the delay between reconnection
    /// attempts.
    pub async fn connect(config: &BusConfig, policy: ReconnectPolicy) -> Result<Self> {
        info!(url = %config.url, "connecting to bus");

        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        state_tx.send_replace(ConnectionState::Connecting);
        let state_tx = Arc::new(state_tx);
        let metrics = BusMetrics::new();
        let ever_connected = Arc::new(AtomicBool::new(false));

        let delay_metrics = Arc::clone(&metrics);
        let event_state = Arc::clone(&state_tx);
        let event_ever_connected = Arc::clone(&ever_connected);

        let client = async_nats::ConnectOptions::new()
            .name(&config.client_name)
            .connection_timeout(config.connection_timeout)
            .retry_on_initial_connect()
            .max_reconnects(None)
            .reconnect_delay_callback(move |attempt| {
                delay_metrics.record_reconnect();
                policy.next(attempt.min(u32::MAX as usize) as u32)
            })
            .event_callback(move |event| {
                let state_tx = Arc::clone(&event_state);
                let ever_connected = Arc::clone(&event_ever_connected);
                async move {
                    match event {
                        ClientEvent::Connected => {
                            ever_connected.store(true, Ordering::SeqCst);
                            state_tx.send_replace(ConnectionState::Connected);
                            info!("bus connection established");
                        }
                        ClientEvent::Disconnected => {
                            let state = if ever_connected.load(Ordering::SeqCst) {
                                ConnectionState::Reconnecting
                            } else {
                                ConnectionState::Connecting
                            };
                            state_tx.send_replace(state);
                            warn!("bus connection lost, reconnecting");
                        }
                        event => {
                            debug!(event = %event, "bus client event");
                        }
                    }
                }
            })
            .connect(config.url.as_str())
            .await
            .map_err(|e| Error::Bus(format!("failed to connect to {}: {e}", config.url)))?;

        Ok(Self {
            client,
            state_rx,
            metrics,
        })
    }

    /// Get the underlying NATS client.
    pub fn client(&self) -> &async_nats::Client {
        &self.client
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Get a receiver tracking the connection state.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Get metrics.
    pub fn metrics(&self) -> &Arc<BusMetrics> {
        &self.metrics
    }

    /// Synchronous round-trip against the server, bounded by `timeout`.
    ///
    /// Used at startup to guarantee the subscription is active before the
    /// process reports itself ready.
    pub async fn flush(&self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.client.flush()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::Bus(format!("bus flush failed: {e}"))),
            Err(_) => Err(Error::Bus(format!(
                "bus flush timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    /// Graceful shutdown: drain the subscription and close the connection.
    pub async fn drain(&self) -> Result<()> {
        info!("draining bus connection");
        self.client
            .drain()
            .await
            .map_err(|e| Error::Bus(format!("failed to drain bus connection: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
        assert_eq!(ConnectionState::Reconnecting.to_string(), "reconnecting");
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
    }

    #[tokio::test]
    #[ignore] // Requires NATS server
    async fn test_connect() {
        let config = BusConfig::new("nats://localhost:4222");
        let connection = BusConnection::connect(&config, ReconnectPolicy::default()).await;
        assert!(connection.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_address_is_fatal() {
        let config = BusConfig::new("not a url");
        let result = BusConnection::connect(&config, ReconnectPolicy::default()).await;
        assert!(matches!(result, Err(Error::Bus(_))));
    }
}
