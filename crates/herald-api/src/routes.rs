//! Route definitions.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::health;
use crate::state::AppState;

/// Create the health router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
