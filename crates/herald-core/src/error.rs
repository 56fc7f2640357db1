//! Error types for the broadcaster.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Startup errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    // Infrastructure errors
    #[error("Event bus error: {0}")]
    Bus(String),

    #[error("Notification delivery failed: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
