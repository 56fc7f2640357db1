//! Herald Core
//!
//! Core domain types, port traits, and error handling for the todo event
//! broadcaster. This crate has minimal dependencies and defines the shared
//! vocabulary used across all other crates.

pub mod config;
pub mod error;
pub mod events;
pub mod ports;

pub use config::Config;
pub use error::{Error, Result};
pub use events::{TodoEvent, render_notification};
pub use ports::Notifier;
