//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording conversation events
//! (conversation start, agent turns, transcript queries) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, while this port records the transcript in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The logger adds the timestamp when it writes the record.
pub struct ConversationEvent {
    /// Event type identifier (e.g. "conversation_started", "agent_message").
    pub event_type: &'static str,
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

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; write failures are swallowed by the
/// implementation so a broken log never interrupts a conversation.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
