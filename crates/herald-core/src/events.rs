//! Domain event wire format and notification rendering.

use serde::Deserialize;

/// A todo domain event as published on the bus.
///
/// Every field is optional: producers evolve independently of this consumer,
/// and an event with an unrecognized or absent `event` kind must still render
/// a best-effort notification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoEvent {
    /// Event kind discriminator, e.g. `todo_created`.
    #[serde(default)]
    pub event: Option<String>,
    /// Title of the todo, where the producer included it.
    #[serde(default)]
    pub title: Option<String>,
    /// Numeric todo identifier.
    #[serde(default, rename = "todoId")]
    pub todo_id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

impl TodoEvent {
    /// Event kind for logging, empty when absent.
    pub fn kind(&self) -> &str {
        self.event.as_deref().unwrap_or("")
    }
}

/// Render the human-readable notification text for an event.
///
/// Unknown kinds fall back to echoing the original payload bytes so that
/// future event shapes remain inspectable by the operator.
pub fn render_notification(event: &TodoEvent, raw: &[u8]) -> String {
    match event.event.as_deref() {
        Some("todo_created") => match event.title.as_deref() {
            Some(title) if !title.is_empty() => format!("Todo created: {title}"),
            _ => "Todo created".to_string(),
        },
        Some("todo_done") => match event.todo_id {
            Some(id) if id != 0 => format!("Todo marked done (id={id})"),
            _ => "Todo marked done".to_string(),
        },
        _ => format!("Todo event: {}", String::from_utf8_lossy(raw)),
    }
}
