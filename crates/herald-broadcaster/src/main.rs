//! Todo event broadcaster entrypoint.
//!
//! Wires the bus connection, the queue-group subscription worker, the
//! Telegram sender, and the health server. Startup order matters: the
//! subscription must be flushed against the server before the process can
//! report itself ready.

use std::sync::Arc;

use herald_api::{AppState, build_app};
use herald_core::config::{BUS_TIMEOUT, Config, RECONNECT_WAIT};
use herald_core::{Notifier, Result};
use herald_nats::{BusConfig, BusConnection, ReconnectPolicy, SubscriptionWorker};
use herald_notify::{TelegramConfig, TelegramSender};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "broadcaster terminated");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let bus_config = BusConfig::from_config(&config);
    let connection =
        BusConnection::connect(&bus_config, ReconnectPolicy::fixed(RECONNECT_WAIT)).await?;

    let notifier: Arc<dyn Notifier> =
        Arc::new(TelegramSender::new(TelegramConfig::from_config(&config)));

    let worker = SubscriptionWorker::subscribe(
        &connection,
        notifier,
        &config.bus_subject,
        &config.bus_queue,
        config.max_inflight,
    )
    .await?;

    // Round-trip against the server so the subscription is active before
    // the readiness probe can flip.
    connection.flush(BUS_TIMEOUT).await?;

    info!(
        subject = %config.bus_subject,
        queue = %config.bus_queue,
        port = config.http_port,
        "broadcaster started"
    );

    tokio::spawn(worker.run());

    let state = AppState::new(connection.watch_state());
    let app = build_app(state);
    let listener = TcpListener::bind(("0.0.0.0", config.http_port)).await?;

    tokio::select! {
        result = herald_api::serve(listener, app) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    connection.drain().await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
