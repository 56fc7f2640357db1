//! Application state shared across handlers.

use herald_nats::ConnectionState;
use tokio::sync::watch;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Connection state published by the bus connection.
    pub bus_state: watch::Receiver<ConnectionState>,
}

impl AppState {
    pub fn new(bus_state: watch::Receiver<ConnectionState>) -> Self {
        Self { bus_state }
    }
}
