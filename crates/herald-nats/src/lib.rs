//! NATS bus adapter for the todo event broadcaster.

pub mod config;
pub mod connection;
pub mod metrics;
pub mod policy;
pub mod subscriber;

pub use config::BusConfig;
pub use connection::{BusConnection, ConnectionState};
pub use metrics::{BusMetrics, MetricsSnapshot};
pub use policy::ReconnectPolicy;
pub use subscriber::SubscriptionWorker;
