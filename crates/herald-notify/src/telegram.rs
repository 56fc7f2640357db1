//! Telegram Bot API sender.

use std::time::Duration;

use async_trait::async_trait;
use herald_core::config::NOTIFY_TIMEOUT;
use herald_core::{Config, Notifier};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Telegram sender configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// API base, overridable so tests can point at a local server.
    pub api_base: String,
    /// Bot credential, templated into the request path.
    pub token: String,
    /// Destination chat identifier.
    pub chat_id: String,
    /// Client-side request timeout.
    pub timeout: Duration,
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            timeout: NOTIFY_TIMEOUT,
        }
    }

    /// Derive the sender config from the process configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.notify_token, &config.notify_recipient)
    }

    /// Override the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Telegram notification sender.
///
/// The client is built once and shared; it is safe for concurrent use. No
/// retry is performed here; retry policy, if any, belongs to the caller.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    pub fn new(config: TelegramConfig) -> Self {
        let timeout = config.timeout;
        Self {
            config,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.config.api_base, self.config.token)
    }

    /// Deliver one message.
    ///
    /// Any status in 2xx is success; any other status or transport-level
    /// failure is an error carrying the status or underlying cause.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        debug!(chat_id = %self.config.chat_id, "sending telegram message");

        let body = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
        });

        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramSender {
    async fn notify(&self, text: &str) -> herald_core::Result<()> {
        self.send_message(text)
            .await
            .map_err(|e| herald_core::Error::Notify(e.to_string()))
    }
}
