//! Broadcaster configuration.
//!
//! The configuration is assembled once at startup from the environment and
//! passed by reference into each component's constructor. Components never
//! read the environment themselves.

use std::time::Duration;

use thiserror::Error;

/// Client name announced to the bus.
pub const CLIENT_NAME: &str = "todo-broadcaster";

/// Bound on the initial connect attempt and the startup flush round-trip.
pub const BUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Wait between reconnection attempts.
pub const RECONNECT_WAIT: Duration = Duration::from_secs(1);

/// Client-side bound on the outbound notification call.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SUBJECT: &str = "todos.events";
const DEFAULT_QUEUE: &str = "broadcaster";
const DEFAULT_MAX_INFLIGHT: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Health server port.
    pub http_port: u16,
    /// Message-bus connection address.
    pub bus_url: String,
    /// External messaging API credential.
    pub notify_token: String,
    /// External messaging API recipient identifier.
    pub notify_recipient: String,
    /// Subject to subscribe on.
    pub bus_subject: String,
    /// Queue-group name shared by all broadcaster replicas.
    pub bus_queue: String,
    /// Bound on concurrently in-flight notification deliveries.
    pub max_inflight: usize,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = match present(&lookup, "PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("{raw:?} is not a valid port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let max_inflight = match present(&lookup, "MAX_INFLIGHT") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_INFLIGHT",
                        reason: format!("{raw:?} is not a positive integer"),
                    });
                }
            },
            None => DEFAULT_MAX_INFLIGHT,
        };

        Ok(Self {
            http_port,
            bus_url: required(&lookup, "BUS_URL")?,
            notify_token: required(&lookup, "NOTIFY_TOKEN")?,
            notify_recipient: required(&lookup, "NOTIFY_RECIPIENT")?,
            bus_subject: present(&lookup, "BUS_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            bus_queue: present(&lookup, "BUS_QUEUE").unwrap_or_else(|| DEFAULT_QUEUE.to_string()),
            max_inflight,
        })
    }
}

fn present<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    present(lookup, key).ok_or(ConfigError::Missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = env(pairs);
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let config = load(&[
            ("BUS_URL", "nats://localhost:4222"),
            ("NOTIFY_TOKEN", "token"),
            ("NOTIFY_RECIPIENT", "42"),
        ])
        .expect("config should load");

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.bus_subject, "todos.events");
        assert_eq!(config.bus_queue, "broadcaster");
        assert_eq!(config.max_inflight, 16);
    }

    #[test]
    fn test_missing_required_value() {
        let err = load(&[("NOTIFY_TOKEN", "token"), ("NOTIFY_RECIPIENT", "42")])
            .expect_err("BUS_URL is required");
        assert!(matches!(err, ConfigError::Missing("BUS_URL")));
        assert_eq!(err.to_string(), "BUS_URL must be set");
    }

    #[test]
    fn test_empty_value_is_unset() {
        let err = load(&[
            ("BUS_URL", "nats://localhost:4222"),
            ("NOTIFY_TOKEN", ""),
            ("NOTIFY_RECIPIENT", "42"),
        ])
        .expect_err("empty NOTIFY_TOKEN should be rejected");
        assert!(matches!(err, ConfigError::Missing("NOTIFY_TOKEN")));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9090"),
            ("BUS_URL", "nats://bus:4222"),
            ("NOTIFY_TOKEN", "token"),
            ("NOTIFY_RECIPIENT", "42"),
            ("BUS_SUBJECT", "todos.audit"),
            ("BUS_QUEUE", "audit"),
            ("MAX_INFLIGHT", "4"),
        ])
        .expect("config should load");

        assert_eq!(config.http_port, 9090);
        assert_eq!(config.bus_subject, "todos.audit");
        assert_eq!(config.bus_queue, "audit");
        assert_eq!(config.max_inflight, 4);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("PORT", "not-a-port"),
            ("BUS_URL", "nats://localhost:4222"),
            ("NOTIFY_TOKEN", "token"),
            ("NOTIFY_RECIPIENT", "42"),
        ])
        .expect_err("bad PORT should be rejected");
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_zero_inflight_rejected() {
        let err = load(&[
            ("BUS_URL", "nats://localhost:4222"),
            ("NOTIFY_TOKEN", "token"),
            ("NOTIFY_RECIPIENT", "42"),
            ("MAX_INFLIGHT", "0"),
        ])
        .expect_err("zero MAX_INFLIGHT should be rejected");
        assert!(matches!(err, ConfigError::Invalid { key: "MAX_INFLIGHT", .. }));
    }
}
