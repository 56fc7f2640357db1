//! Telegram notification delivery for the todo event broadcaster.

pub mod telegram;

pub use telegram::{NotifyError, TelegramConfig, TelegramSender};
