//! Liveness/readiness HTTP surface for the broadcaster.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::build_app;
pub use state::AppState;

use axum::Router;
use tokio::net::TcpListener;

/// Serve the app for the life of the process.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}
