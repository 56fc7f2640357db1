//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use herald_nats::ConnectionState;

use crate::state::AppState;

/// Liveness: always succeeds while the process is running.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Readiness: succeeds only while the bus connection is established.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, String) {
    let bus_state = *state.bus_state.borrow();
    if bus_state == ConnectionState::Connected {
        (StatusCode::OK, "ok".to_string())
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("bus not connected (state={bus_state})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::watch;

    #[tokio::test]
    async fn test_healthz_always_ok() {
        assert_eq!(healthz().await, "ok");
    }

    #[tokio::test]
    async fn test_readyz_follows_connection_state() {
        let (tx, rx) = watch::channel(ConnectionState::Connecting);
        let state = AppState::new(rx);

        let (status, body) = readyz(State(state.clone())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("connecting"));

        tx.send_replace(ConnectionState::Connected);
        let (status, body) = readyz(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        tx.send_replace(ConnectionState::Reconnecting);
        let (status, body) = readyz(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("reconnecting"));
    }
}
