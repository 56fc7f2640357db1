//! Test helper functions and utilities.

use std::net::SocketAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use herald_api::{AppState, build_app};
use herald_core::Notifier;
use herald_notify::{TelegramConfig, TelegramSender};
use reqwest::Client;
use tokio::net::TcpListener;

/// Bot token used by every mocked Telegram endpoint.
pub const TEST_TOKEN: &str = "test-token";

/// Chat id used by every mocked Telegram endpoint.
pub const TEST_CHAT_ID: &str = "42";

/// Request path the mocked Telegram endpoint expects.
pub const TEST_SEND_PATH: &str = "/bottest-token/sendMessage";

/// Start a health server for testing and return its address.
pub async fn start_health_server(
    state: AppState,
) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let app = build_app(state);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    Ok((addr, handle))
}

/// Create an HTTP client for testing.
pub fn test_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("Failed to create test client")
}

/// Build a sender pointed at a mocked Telegram endpoint.
pub fn telegram_sender(api_base: &str) -> TelegramSender {
    TelegramSender::new(TelegramConfig::new(TEST_TOKEN, TEST_CHAT_ID).with_api_base(api_base))
}

/// Notifier that records every delivered text.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, text: &str) -> herald_core::Result<()> {
        self.sent.lock().expect("lock poisoned").push(text.to_string());
        Ok(())
    }
}

/// Wait for a condition with timeout.
pub async fn wait_for<F, Fut>(
    timeout: std::time::Duration,
    interval: std::time::Duration,
    mut condition: F,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition().await {
            return true;
        }
        tokio::time::sleep(interval).await;
    }
    false
}
