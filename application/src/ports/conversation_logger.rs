//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording chat events (user
//! messages, bot replies, endpoint failures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing carries the
//! operator diagnostics, while this port captures the conversation itself in
//! a machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Loggers add the timestamp when writing.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_message", "bot_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; a logger that cannot write drops
/// the event.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
